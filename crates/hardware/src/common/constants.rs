//! Global System Constants.
//!
//! This module defines machine-wide constants used across the simulator. It includes:
//! 1. **Memory Constants:** Reference memory capacity and program load address.
//! 2. **Instruction Constants:** Instruction width and access widths.
//! 3. **Trap Constants:** Well-known trap vectors.

/// Number of 32-bit words in the reference memory sizing (64K words).
pub const MEMORY_WORDS: usize = 1 << 16;

/// Reference memory capacity in bytes.
pub const MEMORY_SIZE: usize = MEMORY_WORDS * WORD_SIZE;

/// Largest memory capacity addressable with a 32-bit address.
pub const MAX_MEMORY_SIZE: u64 = 1 << 32;

/// Address at which program images are copied before execution.
pub const LOAD_ADDRESS: u32 = 0x3000;

/// Size of one instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Size of a machine word in bytes.
pub const WORD_SIZE: usize = 4;

/// Trap vector that writes the low byte of `R1` to the console.
pub const TRAP_PUTC: u16 = 0x1;
