//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the instruction word layout, the opcode and subopcode tables, and
//! the conversions between raw words, typed instructions and assembler text.
//!
//! # Layers
//!
//! * `instruction`: Bitfield layout and pure field extraction.
//! * `opcodes` / `subop`: The two-level `(opcode, subop)` numbering.
//! * `decode` / `encode`: Raw word to [`op::Instruction`] and back.
//! * `disasm` / `asm`: Instruction words to text and back.

/// Register names and trap-argument conventions.
pub mod abi;

/// Two-pass assembler producing program images.
pub mod asm;

/// Field extraction and the `(opcode, subop)` to `Instruction` mapping.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Packing of typed instructions into 32-bit words.
pub mod encode;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// The typed, validated instruction enumeration.
pub mod op;

/// Instruction family opcodes.
pub mod opcodes;

/// Per-family subopcodes.
pub mod subop;

pub use op::Instruction;
