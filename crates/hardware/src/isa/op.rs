//! Typed instruction representation.
//!
//! [`Instruction`] is the validated form of a 32-bit word: every variant is
//! legal by construction, and each carries only the fields its semantics use.
//! Words are converted with [`Instruction::decode`] and converted back with
//! [`Instruction::encode`].

use std::fmt;

use serde::Serialize;

use crate::common::reg::Reg;
use crate::core::units::alu::AluOp;
use crate::core::units::bru::Condition;

/// Width and extension of a load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LoadWidth {
    /// One byte, sign-extended.
    Byte,
    /// One byte, zero-extended.
    ByteUnsigned,
    /// Four bytes.
    Word,
}

/// Width of a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StoreWidth {
    /// Low byte of the source register.
    Byte,
    /// Four bytes.
    Word,
}

/// A decoded, legal instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Instruction {
    /// Stop execution.
    Halt,
    /// Invoke host service `vector`.
    Trap {
        /// Trap vector number.
        vector: u16,
    },
    /// Push the return address and jump to `base + offset`.
    Call {
        /// Base register.
        base: Reg,
        /// Signed displacement.
        offset: i16,
    },
    /// Pop the program counter.
    Ret,
    /// Register-register ALU operation.
    Alu {
        /// Operation.
        op: AluOp,
        /// Destination.
        dr: Reg,
        /// First operand.
        sr1: Reg,
        /// Second operand.
        sr2: Reg,
    },
    /// Register-immediate ALU operation.
    AluImm {
        /// Operation.
        op: AluOp,
        /// Destination.
        dr: Reg,
        /// First operand.
        sr1: Reg,
        /// Sign-extended second operand.
        imm: i16,
    },
    /// Load from `base + offset`.
    Load {
        /// Access width.
        width: LoadWidth,
        /// Destination.
        dr: Reg,
        /// Base register.
        base: Reg,
        /// Unsigned displacement.
        offset: u16,
    },
    /// Store to `base + offset`.
    Store {
        /// Access width.
        width: StoreWidth,
        /// Register holding the value.
        src: Reg,
        /// Base register.
        base: Reg,
        /// Unsigned displacement.
        offset: u16,
    },
    /// `dr = sr1 + sr2 * scale`.
    Lea {
        /// Destination.
        dr: Reg,
        /// Base operand.
        sr1: Reg,
        /// Index operand.
        sr2: Reg,
        /// 12-bit scale.
        scale: u16,
    },
    /// Jump to `base + offset` when `cond` holds.
    Jump {
        /// Condition tested against `FLAGS`.
        cond: Condition,
        /// Base register.
        base: Reg,
        /// Signed displacement.
        offset: i16,
    },
    /// `SP -= 4; [SP] = src`.
    Push {
        /// Register pushed.
        src: Reg,
    },
    /// `dr = [SP]; SP += 4`.
    Pop {
        /// Destination.
        dr: Reg,
    },
}

impl Instruction {
    /// Returns `true` for instructions that write `FLAGS` from their result.
    pub const fn sets_flags(&self) -> bool {
        matches!(self, Self::Alu { .. } | Self::AluImm { .. })
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Halt => "halt",
            Self::Trap { .. } => "trap",
            Self::Call { .. } => "call",
            Self::Ret => "ret",
            Self::Alu { op, .. } => op.mnemonic(),
            Self::AluImm { op, .. } => match op {
                AluOp::Add => "addi",
                AluOp::Sub => "subi",
                AluOp::And => "andi",
                AluOp::Or => "ori",
                AluOp::Xor => "xori",
            },
            Self::Load { width, .. } => match width {
                LoadWidth::Byte => "lb",
                LoadWidth::ByteUnsigned => "lbu",
                LoadWidth::Word => "lw",
            },
            Self::Store { width, .. } => match width {
                StoreWidth::Byte => "sb",
                StoreWidth::Word => "sw",
            },
            Self::Lea { .. } => "lea",
            Self::Jump { cond, .. } => cond.mnemonic(),
            Self::Push { .. } => "push",
            Self::Pop { .. } => "pop",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic();
        match *self {
            Self::Halt | Self::Ret => f.write_str(m),
            Self::Trap { vector } => write!(f, "{m} {vector}"),
            Self::Call { base, offset } | Self::Jump { base, offset, .. } => {
                write!(f, "{m} {offset}({base})")
            }
            Self::Alu { dr, sr1, sr2, .. } => write!(f, "{m} {dr}, {sr1}, {sr2}"),
            Self::AluImm { dr, sr1, imm, .. } => write!(f, "{m} {dr}, {sr1}, {imm}"),
            Self::Load {
                dr, base, offset, ..
            } => write!(f, "{m} {dr}, {offset}({base})"),
            Self::Store {
                src, base, offset, ..
            } => write!(f, "{m} {src}, {offset}({base})"),
            Self::Lea { dr, sr1, sr2, scale } => write!(f, "{m} {dr}, {sr1}, {sr2}, {scale}"),
            Self::Push { src } => write!(f, "{m} {src}"),
            Self::Pop { dr } => write!(f, "{m} {dr}"),
        }
    }
}
