//! Fault and Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Faults:** Fatal conditions raised while executing guest code.
//! 2. **Load Errors:** Failures while reading or placing a program image.
//! 3. **Configuration Errors:** Rejected configuration documents.
//! 4. **Assembler Errors:** Diagnostics produced while assembling source text.
//!
//! Non-fatal conditions (such as an unmapped trap vector) are not errors; they
//! are logged and counted in [`SimStats`](crate::stats::SimStats).

use std::path::PathBuf;

use thiserror::Error;

use super::data::AccessType;

/// Fatal execution faults.
///
/// A fault aborts the fetch loop immediately. The faulting instruction's
/// register, flag and memory effects are not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The `(opcode, subopcode)` pair is not mapped by the dispatcher.
    #[error("IllegalInstruction({raw:#010x}) at pc {pc:#010x}")]
    IllegalInstruction {
        /// Raw 32-bit instruction word.
        raw: u32,
        /// Address the instruction was fetched from.
        pc: u32,
    },

    /// A load, store or fetch whose `addr + width` exceeds memory capacity.
    #[error("OutOfBoundsAccess({addr:#010x}): {width}-byte {access} past end of memory")]
    OutOfBoundsAccess {
        /// First byte address of the rejected access.
        addr: u32,
        /// Width of the access in bytes.
        width: usize,
        /// Kind of access that faulted.
        access: AccessType,
    },
}

/// Errors raised while preparing a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image does not fit in memory at the configured load address.
    #[error(
        "ProgramTooLarge: {len} bytes at {load_address:#010x} exceed memory capacity of {capacity:#x} bytes"
    )]
    ProgramTooLarge {
        /// Image length in bytes.
        len: usize,
        /// Requested load address.
        load_address: u32,
        /// Memory capacity in bytes.
        capacity: usize,
    },

    /// The image file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while parsing or validating a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Memory size is zero or not addressable with 32-bit addresses.
    #[error("memory size {0:#x} must be between 1 byte and 4 GiB")]
    InvalidMemorySize(usize),

    /// Load address lies outside memory.
    #[error("load address {load_address:#010x} is outside {memory_size:#x} bytes of memory")]
    LoadAddressOutOfRange {
        /// Configured load address.
        load_address: u32,
        /// Configured memory size.
        memory_size: usize,
    },
}

/// Assembler diagnostics, each tagged with the 1-based source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmError {
    /// Mnemonic is not part of the instruction set.
    #[error("line {line}: unknown mnemonic '{mnemonic}'")]
    UnknownMnemonic {
        /// Source line.
        line: usize,
        /// Offending mnemonic.
        mnemonic: String,
    },

    /// Wrong number of operands for the mnemonic.
    #[error("line {line}: '{mnemonic}' expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Source line.
        line: usize,
        /// Mnemonic being assembled.
        mnemonic: String,
        /// Operand count the mnemonic takes.
        expected: usize,
        /// Operand count supplied.
        found: usize,
    },

    /// Operand could not be parsed as a register, immediate or address.
    #[error("line {line}: invalid operand '{operand}'")]
    InvalidOperand {
        /// Source line.
        line: usize,
        /// Offending operand text.
        operand: String,
    },

    /// Immediate does not fit its bit field.
    #[error("line {line}: value {value} does not fit in {bits} bits")]
    OutOfRange {
        /// Source line.
        line: usize,
        /// Value that was supplied.
        value: i64,
        /// Width of the target field.
        bits: u32,
    },

    /// Label referenced but never defined.
    #[error("line {line}: undefined label '{label}'")]
    UndefinedLabel {
        /// Source line.
        line: usize,
        /// Missing label.
        label: String,
    },

    /// Label defined more than once.
    #[error("line {line}: duplicate label '{label}'")]
    DuplicateLabel {
        /// Source line.
        line: usize,
        /// Repeated label.
        label: String,
    },
}

/// Umbrella error for callers that drive the whole simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// Execution fault.
    #[error(transparent)]
    Fault(#[from] Fault),
    /// Program loading failure.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Assembler failure.
    #[error(transparent)]
    Asm(#[from] AsmError),
}

/// Result alias over [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;
