//! Execution units.
//!
//! The integer ALU and the branch resolution unit. Memory access goes
//! straight to [`crate::soc::Memory`]; there is no cache or translation.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit (jump condition evaluation).
pub mod bru;
