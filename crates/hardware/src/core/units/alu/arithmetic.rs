//! ALU arithmetic operations.
//!
//! Addition and subtraction wrap modulo 2^32; there is no carry or overflow
//! flag, only the sign-derived condition codes computed by the dispatcher.

/// Operations handled by the arithmetic unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
}

/// Executes an integer arithmetic operation.
#[inline(always)]
pub const fn execute(op: ArithOp, a: u32, b: u32) -> u32 {
    match op {
        ArithOp::Add => a.wrapping_add(b),
        ArithOp::Sub => a.wrapping_sub(b),
    }
}
