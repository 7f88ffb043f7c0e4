//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction word into assembler text for debug tracing,
//! logging, and test diagnostics. The output is accepted unchanged by
//! [`assemble`](crate::isa::asm::assemble).
//!
//! # Format
//!
//! - ALU: `add r3, r1, r2`, `addi r1, r0, -3`
//! - Memory: `lw r1, 8(r2)`, `sb r1, 0(r2)`, `lea r1, r2, r3, 4`
//! - Control flow: `jle -8(pc)`, `call 16(pc)`, `ret`, `trap 1`
//! - Stack: `push r1`, `pop r2`
//! - Unmapped words: `.word 0x60000000`
//!
//! # Usage
//!
//! ```
//! use w32sim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x1400_0000), "xor r0, r0, r0");
//! ```

use crate::isa::decode::decode;
use crate::isa::op::Instruction;

/// Disassembles a 32-bit instruction word into a human-readable string.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    Instruction::try_from(decode(inst))
        .map_or_else(|_| format!(".word {inst:#010x}"), |i| i.to_string())
}

/// Disassembles a little-endian image into `(address, word, text)` rows.
///
/// A trailing partial word is ignored.
pub fn disassemble_image(image: &[u8], base: u32) -> Vec<(u32, u32, String)> {
    image
        .chunks_exact(4)
        .enumerate()
        .map(|(i, chunk)| {
            let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let addr = base.wrapping_add((i as u32).wrapping_mul(4));
            (addr, word, disassemble(word))
        })
        .collect()
}
