//! W32 instruction-set simulator library.
//!
//! This crate implements an instruction-level simulator for a 32-bit-word RISC machine with the following:
//! 1. **Core:** Sixteen-register file, condition codes, ALU and the per-family execution dispatcher.
//! 2. **Memory:** Flat, bounds-checked, little-endian byte-addressed main memory.
//! 3. **ISA:** Field extraction, typed decoding, encoding, disassembly and a two-pass assembler.
//! 4. **SoC:** The memory bus and the console behind the `PUTC` trap vector.
//! 5. **Simulation:** Loader, fetch loop, step observers, configuration and statistics.
//!
//! # Examples
//!
//! ```
//! use w32sim_core::{Config, Simulator};
//! use w32sim_core::common::Reg;
//! use w32sim_core::core::cpu::HostTraps;
//! use w32sim_core::isa::asm::assemble_to_bytes;
//! use w32sim_core::sim::RunOutcome;
//!
//! let image = assemble_to_bytes("addi r1, r0, 5\naddi r2, r0, -3\nadd r3, r1, r2\nhalt").unwrap();
//! let mut sim = Simulator::with_traps(&Config::default(), HostTraps::new(Vec::new()));
//! sim.load_program(&image).unwrap();
//!
//! assert_eq!(sim.run().unwrap(), RunOutcome::Halted { cycles: 4 });
//! assert_eq!(sim.cpu.regs.read(Reg::R3), 2);
//! ```

/// Common types and constants (registers, faults, access types).
pub mod common;
/// Simulator configuration (defaults and JSON parsing).
pub mod config;
/// CPU core (state, execution, traps, units).
pub mod core;
/// Instruction set (layout, decode, encode, disassembler, assembler).
pub mod isa;
/// Loader, simulator loop and observers.
pub mod sim;
/// Memory bus and host devices.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; holds registers, memory, and stats.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new` or `Simulator::with_traps`.
pub use crate::sim::Simulator;
/// Main memory type.
pub use crate::soc::Memory;
