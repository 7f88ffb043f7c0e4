//! Register naming and calling-convention constants.
//!
//! Defines the assembler names of the sixteen registers and the registers
//! the trap interface reads its arguments from.

use crate::common::reg::{REG_COUNT, Reg};

/// Assembler names for registers 0-15.
pub const REG_NAMES: [&str; REG_COUNT] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "pc", "fp", "sp", "ra", "fl",
];

/// Register whose low byte the `PUTC` trap writes to the console.
pub const TRAP_ARG: Reg = Reg::R1;

/// Looks up a register by its assembler name (case-insensitive).
///
/// Accepts `flags` as an alias of `fl`.
pub fn lookup(name: &str) -> Option<Reg> {
    let lower = name.to_ascii_lowercase();
    if lower == "flags" {
        return Some(Reg::Flags);
    }
    REG_NAMES
        .iter()
        .position(|&n| n == lower)
        .map(|i| Reg::from_index(i as u32))
}
