/// Two-pass assembler tests.
pub mod asm;

/// Field extraction and typed decoding.
pub mod decode;
