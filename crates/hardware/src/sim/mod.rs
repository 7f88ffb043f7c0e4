//! Simulation driver, program loading and step observers.
//!
//! Provides the fetch loop wrapper around the CPU, utilities for getting a
//! program image into memory, and the renderers that watch execution.

/// Program image loading and placement.
pub mod loader;

/// Top-level simulator and run loop.
pub mod simulator;

/// Step observers and memory dumps.
pub mod trace;

pub use simulator::{RunOutcome, Simulator, StepOutcome};
