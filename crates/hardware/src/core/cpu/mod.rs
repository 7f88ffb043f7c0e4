//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire machine state. It coordinates the following:
//! 1. **State Management:** Owns the register file and the halted latch.
//! 2. **Memory:** Owns the flat main memory all loads, stores and fetches go through.
//! 3. **Execution:** Fetch, decode and dispatch live in [`execution`].
//! 4. **Host Services:** Trap vectors are delegated to a [`trap::TrapHandler`].

/// Fetch, decode and per-family instruction semantics.
pub mod execution;

/// Host trap interface and the default console-backed handler.
pub mod trap;

use std::io::{self, Write};

use crate::common::reg::{Reg, RegisterFile};
use crate::config::Config;
use crate::core::arch::flags::Flags;
use crate::soc::Memory;
use crate::stats::SimStats;

pub use self::execution::Retired;
pub use self::trap::{HostTraps, TrapHandler, TrapOutcome};

/// Main CPU structure containing all machine state.
///
/// Every field is owned; observers only ever see borrows or snapshots.
#[derive(Debug)]
pub struct Cpu {
    /// Architectural registers, including `PC`, `SP` and `FLAGS`.
    pub regs: RegisterFile,
    /// Main memory.
    pub bus: Memory,
    /// Set by HALT; the fetch loop stops once this is raised.
    pub halted: bool,
    /// Execution statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU in its reset state.
    ///
    /// Memory is zero-filled, `FLAGS = Z`, `PC` is the configured load address, `SP`
    /// is the configured initial stack pointer (or 0), and every other register is 0.
    ///
    /// # Arguments
    ///
    /// * `config` - The simulator configuration parameters.
    pub fn new(config: &Config) -> Self {
        let mut regs = RegisterFile::new();
        regs.set_flags(Flags::ZERO);
        regs.set_pc(config.system.load_address);
        regs.set_sp(config.general.initial_sp.unwrap_or(0));

        Self {
            regs,
            bus: Memory::new(config.system.memory_size),
            halted: false,
            stats: SimStats::default(),
        }
    }

    /// Writes the register file as a two-row table.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn dump_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in Reg::ALL.chunks(8) {
            for reg in row {
                write!(out, " {:>10} |", reg.name())?;
            }
            writeln!(out)?;
            for &reg in row {
                write!(out, " {:#010x} |", self.regs.read(reg))?;
            }
            writeln!(out)?;
        }
        writeln!(out, " flags = {}", self.regs.flags())
    }
}
