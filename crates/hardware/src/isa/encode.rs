//! Instruction Encoder.
//!
//! The inverse of decoding: packs a typed [`Instruction`] back into its
//! 32-bit word. Fields an instruction does not use are encoded as zero, so
//! `decode(encode(i)) == i` for every instruction.

use crate::common::reg::Reg;
use crate::core::units::alu::AluOp;
use crate::core::units::bru::Condition;
use crate::isa::decode::{ALU_IMM, ALU_REG};
use crate::isa::instruction::{
    DR_SHIFT, IMM16_MASK, OFF12_MASK, OPCODE_SHIFT, SR1_SHIFT, SR2_SHIFT, SUBOP_SHIFT,
};
use crate::isa::op::{Instruction, LoadWidth, StoreWidth};
use crate::isa::opcodes::{OP_ALU, OP_ALU_IMM, OP_CONTROL, OP_JUMP, OP_MEM, OP_STACK};
use crate::isa::subop::{control, mem, stack};

/// Packs the family, subop and register fields.
const fn word(opcode: u32, subop: u32, dr: Reg, sr1: Reg, sr2: Reg) -> u32 {
    (opcode << OPCODE_SHIFT)
        | (subop << SUBOP_SHIFT)
        | ((dr as u32) << DR_SHIFT)
        | ((sr1 as u32) << SR1_SHIFT)
        | ((sr2 as u32) << SR2_SHIFT)
}

/// Packs a word carrying a 16-bit immediate in place of `sr2`.
const fn word_imm(opcode: u32, subop: u32, dr: Reg, base: Reg, imm: u16) -> u32 {
    word(opcode, subop, dr, base, Reg::R0) | (imm as u32 & IMM16_MASK)
}

/// Position of `op` in a subopcode table.
fn subop_of(table: &[AluOp; 5], op: AluOp) -> u32 {
    table.iter().position(|&o| o == op).unwrap_or_default() as u32
}

const fn cond_subop(cond: Condition) -> u32 {
    cond as u32
}

impl Instruction {
    /// Encodes this instruction as a 32-bit word.
    ///
    /// # Examples
    ///
    /// ```
    /// use w32sim_core::common::Reg;
    /// use w32sim_core::core::units::alu::AluOp;
    /// use w32sim_core::isa::op::Instruction;
    ///
    /// let xor = Instruction::Alu { op: AluOp::Xor, dr: Reg::R0, sr1: Reg::R0, sr2: Reg::R0 };
    /// assert_eq!(xor.encode(), 0x1400_0000);
    /// ```
    pub fn encode(&self) -> u32 {
        let r0 = Reg::R0;
        match *self {
            Self::Halt => word(OP_CONTROL, control::HALT, r0, r0, r0),
            Self::Trap { vector } => word_imm(OP_CONTROL, control::TRAP, r0, r0, vector),
            Self::Call { base, offset } => {
                word_imm(OP_CONTROL, control::CALL, r0, base, offset as u16)
            }
            Self::Ret => word(OP_CONTROL, control::RET, r0, r0, r0),
            Self::Alu { op, dr, sr1, sr2 } => word(OP_ALU, subop_of(&ALU_REG, op), dr, sr1, sr2),
            Self::AluImm { op, dr, sr1, imm } => {
                word_imm(OP_ALU_IMM, subop_of(&ALU_IMM, op), dr, sr1, imm as u16)
            }
            Self::Load {
                width,
                dr,
                base,
                offset,
            } => {
                let subop = match width {
                    LoadWidth::Byte => mem::LB,
                    LoadWidth::ByteUnsigned => mem::LBU,
                    LoadWidth::Word => mem::LW,
                };
                word_imm(OP_MEM, subop, dr, base, offset)
            }
            Self::Store {
                width,
                src,
                base,
                offset,
            } => {
                let subop = match width {
                    StoreWidth::Byte => mem::SB,
                    StoreWidth::Word => mem::SW,
                };
                word_imm(OP_MEM, subop, src, base, offset)
            }
            Self::Lea { dr, sr1, sr2, scale } => {
                word(OP_MEM, mem::LEA, dr, sr1, sr2) | (scale as u32 & OFF12_MASK)
            }
            Self::Jump { cond, base, offset } => {
                word_imm(OP_JUMP, cond_subop(cond), r0, base, offset as u16)
            }
            Self::Push { src } => word(OP_STACK, stack::PUSH, src, r0, r0),
            Self::Pop { dr } => word(OP_STACK, stack::POP, dr, r0, r0),
        }
    }
}
