//! Instruction family opcodes (bits 31-28).

/// Control and system instructions (HALT, TRAP, CALL, RET).
pub const OP_CONTROL: u32 = 0x0;

/// Register-register arithmetic and logic.
pub const OP_ALU: u32 = 0x1;

/// Register-immediate arithmetic and logic.
pub const OP_ALU_IMM: u32 = 0x2;

/// Loads, stores and address computation.
pub const OP_MEM: u32 = 0x3;

/// Conditional jumps.
pub const OP_JUMP: u32 = 0x4;

/// Stack push and pop.
pub const OP_STACK: u32 = 0x5;
