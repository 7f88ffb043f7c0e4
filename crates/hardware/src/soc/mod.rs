//! Memory system.
//!
//! This module contains the bus-side components of the machine:
//! 1. **Memory:** Flat byte-addressed main memory with bounds-checked access.
//! 2. **Traits:** The `MemValue` trait describing the widths the bus moves.
//! 3. **Devices:** Host-side devices reachable from trap vectors (the console).

/// Host devices (console output).
pub mod devices;

/// Main memory.
pub mod memory;

/// Bus value trait.
pub mod traits;

pub use memory::Memory;
pub use traits::MemValue;
