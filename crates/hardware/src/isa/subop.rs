//! Subopcodes (bits 27-24).
//!
//! The subopcode distinguishes instructions sharing the same family opcode.
//! Each family has its own numbering; the register and immediate ALU families
//! order their operators differently.

/// Control family (`OP_CONTROL`).
pub mod control {
    /// Stop the fetch loop after this instruction.
    pub const HALT: u32 = 0x1;
    /// Invoke the host trap vector in `imm16`.
    pub const TRAP: u32 = 0x2;
    /// Push the return address and jump to `base + sext(off16)`.
    pub const CALL: u32 = 0x3;
    /// Pop the program counter.
    pub const RET: u32 = 0x4;
}

/// Register ALU family (`OP_ALU`).
pub mod alu {
    /// `dr = sr1 + sr2`.
    pub const ADD: u32 = 0x0;
    /// `dr = sr1 - sr2`.
    pub const SUB: u32 = 0x1;
    /// `dr = sr1 & sr2`.
    pub const AND: u32 = 0x2;
    /// `dr = sr1 | sr2`.
    pub const OR: u32 = 0x3;
    /// `dr = sr1 ^ sr2`.
    pub const XOR: u32 = 0x4;
}

/// Immediate ALU family (`OP_ALU_IMM`).
pub mod alu_imm {
    /// `dr = sr1 + sext(imm16)`.
    pub const ADDI: u32 = 0x0;
    /// `dr = sr1 & sext(imm16)`.
    pub const ANDI: u32 = 0x1;
    /// `dr = sr1 | sext(imm16)`.
    pub const ORI: u32 = 0x2;
    /// `dr = sr1 ^ sext(imm16)`.
    pub const XORI: u32 = 0x3;
    /// `dr = sr1 - sext(imm16)`.
    pub const SUBI: u32 = 0x4;
}

/// Memory family (`OP_MEM`).
pub mod mem {
    /// Load byte, sign-extended.
    pub const LB: u32 = 0x1;
    /// Load byte, zero-extended.
    pub const LBU: u32 = 0x2;
    /// Load word.
    pub const LW: u32 = 0x3;
    /// Store low byte of `dr`.
    pub const SB: u32 = 0x5;
    /// Store word.
    pub const SW: u32 = 0x6;
    /// Scaled-index address computation: `dr = sr1 + sr2 * off12`.
    pub const LEA: u32 = 0x7;
}

/// Conditional jump family (`OP_JUMP`).
pub mod jump {
    /// Always taken.
    pub const JMP: u32 = 0x0;
    /// Taken on Z.
    pub const JE: u32 = 0x1;
    /// Taken on N or P.
    pub const JNE: u32 = 0x2;
    /// Taken on N.
    pub const JL: u32 = 0x3;
    /// Taken on P.
    pub const JG: u32 = 0x4;
    /// Taken on P or Z.
    pub const JGE: u32 = 0x5;
    /// Taken on N or Z.
    pub const JLE: u32 = 0x6;
}

/// Stack family (`OP_STACK`).
pub mod stack {
    /// `SP -= 4; [SP] = dr`.
    pub const PUSH: u32 = 0x0;
    /// `dr = [SP]; SP += 4`.
    pub const POP: u32 = 0x1;
}
