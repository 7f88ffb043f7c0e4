//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU shared by the register and
//! immediate ALU instruction families. All arithmetic wraps at 32 bits.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      And, Or, Xor

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor).
pub mod logic;

use serde::Serialize;

use self::arithmetic::ArithOp;
use self::logic::LogicOp;

/// ALU operation selected by an instruction's subopcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
}

impl AluOp {
    /// Mnemonic stem shared by the register and immediate forms.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
        }
    }
}

/// Arithmetic Logic Unit for 32-bit integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use w32sim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Xor, 0b1100, 0b1010), 0b0110);
    /// ```
    #[inline(always)]
    pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add => arithmetic::execute(ArithOp::Add, a, b),
            AluOp::Sub => arithmetic::execute(ArithOp::Sub, a, b),
            AluOp::And => logic::execute(LogicOp::And, a, b),
            AluOp::Or => logic::execute(LogicOp::Or, a, b),
            AluOp::Xor => logic::execute(LogicOp::Xor, a, b),
        }
    }
}
