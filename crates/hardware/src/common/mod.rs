//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Machine-wide constants for memory, instructions, and traps.
//! 2. **Memory Access:** Definitions for categorizing memory operations (Fetch/Read/Write).
//! 3. **Error Handling:** Fault, load, configuration and assembler error types.
//! 4. **Register Management:** The register enumeration, register file and snapshots.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and fault definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::AccessType;
pub use error::{AsmError, ConfigError, Fault, LoadError, SimError};
pub use reg::{Reg, RegisterFile, RegisterSnapshot};
