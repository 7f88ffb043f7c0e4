//! Instruction Decoder.
//!
//! Decoding happens in two steps:
//! 1. **Field extraction:** [`decode`] splits a word into its raw bitfields. This never fails.
//! 2. **Dispatch mapping:** `Instruction::try_from(Decoded)` maps the `(opcode, subop)`
//!    pair onto a typed [`Instruction`], rejecting unmapped pairs.
//!
//! Immediates are extracted unextended; the mapping step decides per family
//! whether the 16-bit field is a signed delta or an unsigned offset.

use crate::common::error::Fault;
use crate::core::units::alu::AluOp;
use crate::core::units::bru::Condition;
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::op::{Instruction, LoadWidth, StoreWidth};
use crate::isa::opcodes::{OP_ALU, OP_ALU_IMM, OP_CONTROL, OP_JUMP, OP_MEM, OP_STACK};
use crate::isa::subop::{control, mem, stack};

/// Register ALU operators indexed by subopcode.
pub const ALU_REG: [AluOp; 5] = [AluOp::Add, AluOp::Sub, AluOp::And, AluOp::Or, AluOp::Xor];

/// Immediate ALU operators indexed by subopcode.
pub const ALU_IMM: [AluOp; 5] = [AluOp::Add, AluOp::And, AluOp::Or, AluOp::Xor, AluOp::Sub];

/// A word whose `(opcode, subop)` pair has no instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllegalEncoding(pub u32);

impl IllegalEncoding {
    /// Converts into the fatal fault for a fetch from `pc`.
    pub const fn at(self, pc: u32) -> Fault {
        Fault::IllegalInstruction { raw: self.0, pc }
    }
}

/// Extracts every field of an instruction word.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction word.
///
/// # Returns
///
/// A `Decoded` holding the unextended fields and a copy of the word.
pub fn decode(inst: u32) -> Decoded {
    Decoded {
        raw: inst,
        opcode: inst.opcode(),
        subop: inst.subop(),
        dr: inst.dr(),
        sr1: inst.sr1(),
        sr2: inst.sr2(),
        imm16: inst.imm16(),
        off12: inst.off12(),
    }
}

impl TryFrom<Decoded> for Instruction {
    type Error = IllegalEncoding;

    fn try_from(d: Decoded) -> Result<Self, Self::Error> {
        let illegal = IllegalEncoding(d.raw);
        let subop = d.subop as usize;
        let signed = d.imm16 as i16;

        let inst = match d.opcode {
            OP_CONTROL => match d.subop {
                control::HALT => Self::Halt,
                control::TRAP => Self::Trap { vector: d.imm16 },
                control::CALL => Self::Call {
                    base: d.base(),
                    offset: signed,
                },
                control::RET => Self::Ret,
                _ => return Err(illegal),
            },
            OP_ALU => Self::Alu {
                op: *ALU_REG.get(subop).ok_or(illegal)?,
                dr: d.dr,
                sr1: d.sr1,
                sr2: d.sr2,
            },
            OP_ALU_IMM => Self::AluImm {
                op: *ALU_IMM.get(subop).ok_or(illegal)?,
                dr: d.dr,
                sr1: d.sr1,
                imm: signed,
            },
            OP_MEM => {
                let load = |width| Self::Load {
                    width,
                    dr: d.dr,
                    base: d.base(),
                    offset: d.imm16,
                };
                let store = |width| Self::Store {
                    width,
                    src: d.dr,
                    base: d.base(),
                    offset: d.imm16,
                };
                match d.subop {
                    mem::LB => load(LoadWidth::Byte),
                    mem::LBU => load(LoadWidth::ByteUnsigned),
                    mem::LW => load(LoadWidth::Word),
                    mem::SB => store(StoreWidth::Byte),
                    mem::SW => store(StoreWidth::Word),
                    mem::LEA => Self::Lea {
                        dr: d.dr,
                        sr1: d.sr1,
                        sr2: d.sr2,
                        scale: d.off12,
                    },
                    _ => return Err(illegal),
                }
            }
            OP_JUMP => Self::Jump {
                cond: *Condition::ALL.get(subop).ok_or(illegal)?,
                base: d.base(),
                offset: signed,
            },
            OP_STACK => match d.subop {
                stack::PUSH => Self::Push { src: d.dr },
                stack::POP => Self::Pop { dr: d.dr },
                _ => return Err(illegal),
            },
            _ => return Err(illegal),
        };
        Ok(inst)
    }
}

impl Instruction {
    /// Decodes a word fetched from `pc`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::IllegalInstruction`] for unmapped `(opcode, subop)` pairs.
    pub fn decode(raw: u32, pc: u32) -> Result<Self, Fault> {
        Self::try_from(decode(raw)).map_err(|e| e.at(pc))
    }
}
