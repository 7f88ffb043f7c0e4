//! Host-side devices.
//!
//! Devices here are reached from guest code through trap vectors rather than
//! memory-mapped registers. The machine has a single device: the console.

/// Character output console.
pub mod console;

pub use console::Console;
