//! Host Trap Interface.
//!
//! This module implements the `TRAP` instruction's host side. It performs the following:
//! 1. **Dispatch:** Routes a trap vector to the host service registered for it.
//! 2. **Console Output:** Vector `0x1` (`PUTC`) writes the low byte of `r1` to a console.
//! 3. **Extensibility:** Any `TrapHandler` can replace the default, so new vectors
//!    need no change to the core. Unmapped vectors are reported, not faulted.

use std::io::{self, Write};

use crate::common::constants::TRAP_PUTC;
use crate::common::reg::RegisterFile;
use crate::isa::abi;
use crate::soc::devices::Console;

/// Result of delivering a trap vector to a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapOutcome {
    /// The vector was serviced.
    Handled,
    /// No service is registered for the vector; execution continues.
    Unmapped,
}

/// Host services invoked by the `TRAP` instruction.
///
/// Handlers see the register file read-only; a trap never changes machine state.
pub trait TrapHandler {
    /// Services `vector`.
    ///
    /// # Arguments
    ///
    /// * `vector` - The 16-bit trap vector from the instruction.
    /// * `regs` - The register file at the time of the trap.
    fn handle(&mut self, vector: u16, regs: &RegisterFile) -> TrapOutcome;
}

/// Default trap table: `PUTC` to a console.
#[derive(Debug)]
pub struct HostTraps<W: Write = io::Stdout> {
    console: Console<W>,
}

impl HostTraps<io::Stdout> {
    /// Trap table whose console is standard output.
    pub fn stdout() -> Self {
        Self {
            console: Console::stdout(),
        }
    }
}

impl<W: Write> HostTraps<W> {
    /// Trap table whose console writes to `sink`.
    pub const fn new(sink: W) -> Self {
        Self {
            console: Console::new(sink),
        }
    }

    /// Borrows the console.
    pub const fn console(&self) -> &Console<W> {
        &self.console
    }

    /// Consumes the table and returns the console's sink.
    pub fn into_inner(self) -> W {
        self.console.into_inner()
    }
}

impl<W: Write> TrapHandler for HostTraps<W> {
    fn handle(&mut self, vector: u16, regs: &RegisterFile) -> TrapOutcome {
        match vector {
            TRAP_PUTC => {
                let byte = regs.read(abi::TRAP_ARG) as u8;
                if let Err(e) = self.console.put(byte) {
                    tracing::warn!(vector, "console write failed: {e}");
                }
                TrapOutcome::Handled
            }
            _ => TrapOutcome::Unmapped,
        }
    }
}

impl<T: TrapHandler + ?Sized> TrapHandler for &mut T {
    fn handle(&mut self, vector: u16, regs: &RegisterFile) -> TrapOutcome {
        (**self).handle(vector, regs)
    }
}
