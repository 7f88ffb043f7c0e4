//! Core processor implementation.
//!
//! This module contains the CPU state container, the execution units it
//! dispatches to, and the architectural condition-code definitions.

/// Architecture-specific components (condition-code flags).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Execution units (ALU, branch resolution).
pub mod units;

pub use self::cpu::Cpu;
