//! Memory Access Types.
//!
//! Classifies bus accesses so an out-of-bounds fault can report whether a fetch,
//! a load or a store ran past the end of memory.

use std::fmt;

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data loads, and data stores
/// when a bus access is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Occurs when the fetch loop reads the word at `PC`.
    Fetch,

    /// Data read access.
    ///
    /// Occurs during load, `POP` and `RET` instructions.
    Read,

    /// Data write access.
    ///
    /// Occurs during store, `PUSH` and `CALL` instructions.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Read => "read",
            Self::Write => "write",
        };
        f.write_str(name)
    }
}
