//! Simulator: owns the CPU and the host trap table side-by-side.
//!
//! Keeping the trap handler next to (not inside) the `Cpu` lets a step borrow
//! both mutably at once without `take()`-ing the handler out of the machine.

use std::io;

use tracing::{debug, info, warn};

use crate::common::error::{Fault, LoadError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::{HostTraps, Retired, TrapHandler};
use crate::sim::loader;
use crate::sim::trace::{Observer, StepEvent};

/// Result of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction retired and the machine is still running.
    Continue,
    /// The machine is halted; either this step executed HALT or an earlier one did.
    Halted,
}

/// Result of a run that did not fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// HALT was executed.
    Halted {
        /// Fetch cycles consumed, including the HALT.
        cycles: u64,
    },
    /// The configured cycle limit was reached before HALT.
    CycleLimit {
        /// Fetch cycles consumed.
        cycles: u64,
    },
}

/// Top-level simulator: CPU state plus host trap services.
#[derive(Debug)]
pub struct Simulator<T: TrapHandler = HostTraps> {
    /// CPU architectural state (registers, memory, stats).
    pub cpu: Cpu,
    /// Host services for `TRAP` instructions.
    pub traps: T,
    config: Config,
}

impl Simulator<HostTraps> {
    /// Creates a simulator whose `PUTC` trap writes to standard output.
    pub fn new(config: &Config) -> Self {
        Self::with_traps(config, HostTraps::stdout())
    }
}

impl<T: TrapHandler> Simulator<T> {
    /// Creates a simulator with a custom trap handler.
    ///
    /// # Arguments
    ///
    /// * `config` - The simulator configuration parameters.
    /// * `traps` - Host services for `TRAP` instructions.
    pub fn with_traps(config: &Config, traps: T) -> Self {
        Self {
            cpu: Cpu::new(config),
            traps,
            config: config.clone(),
        }
    }

    /// The configuration this simulator was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Copies a program image to the configured load address.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ProgramTooLarge`] if the image does not fit.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), LoadError> {
        loader::load_image(&mut self.cpu.bus, image, self.config.system.load_address)
    }

    /// Executes one instruction.
    ///
    /// A halted machine is not stepped further and reports `Halted` again.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] that stopped the instruction.
    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        if self.cpu.halted {
            return Ok(StepOutcome::Halted);
        }
        let retired = self.cpu.step(&mut self.traps)?;
        self.log_retired(&retired);
        Ok(self.outcome())
    }

    /// Executes one instruction and reports it to `observer`.
    ///
    /// The register snapshot handed to the observer as `before` is taken
    /// immediately before the step.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] that stopped the instruction; the observer is not
    /// notified for a faulting step.
    pub fn step_observed(&mut self, observer: &mut dyn Observer) -> Result<StepOutcome, Fault> {
        if self.cpu.halted {
            return Ok(StepOutcome::Halted);
        }
        let before = self.cpu.regs.snapshot();
        let retired = self.cpu.step(&mut self.traps)?;
        self.log_retired(&retired);

        let after = self.cpu.regs.snapshot();
        let event = StepEvent {
            cycle: self.cpu.stats.cycles,
            pc: retired.pc,
            raw: retired.raw,
            inst: retired.inst,
            before: &before,
            after: &after,
            memory: &self.cpu.bus,
        };
        if let Err(e) = observer.on_step(&event) {
            report_observer_error(&e);
        }
        Ok(self.outcome())
    }

    /// Runs until HALT, a fault, or the configured cycle limit.
    ///
    /// # Errors
    ///
    /// Returns the first [`Fault`] raised.
    pub fn run(&mut self) -> Result<RunOutcome, Fault> {
        self.run_with(|sim| sim.step())
    }

    /// Like [`run`](Self::run), notifying `observer` after every instruction.
    ///
    /// # Errors
    ///
    /// Returns the first [`Fault`] raised.
    pub fn run_observed(&mut self, observer: &mut dyn Observer) -> Result<RunOutcome, Fault> {
        self.run_with(|sim| sim.step_observed(observer))
    }

    fn run_with(
        &mut self,
        mut step: impl FnMut(&mut Self) -> Result<StepOutcome, Fault>,
    ) -> Result<RunOutcome, Fault> {
        let limit = self.config.general.max_cycles;
        loop {
            let cycles = self.cpu.stats.cycles;
            if !self.cpu.halted && limit.is_some_and(|max| cycles >= max) {
                info!("cycle limit reached after {cycles} cycles");
                return Ok(RunOutcome::CycleLimit { cycles });
            }
            if step(self)? == StepOutcome::Halted {
                let cycles = self.cpu.stats.cycles;
                info!("halted after {cycles} cycles");
                return Ok(RunOutcome::Halted { cycles });
            }
        }
    }

    const fn outcome(&self) -> StepOutcome {
        if self.cpu.halted {
            StepOutcome::Halted
        } else {
            StepOutcome::Continue
        }
    }

    fn log_retired(&self, retired: &Retired) {
        if self.config.general.trace_instructions {
            debug!("{:#010x}: {}", retired.pc, retired.inst);
        }
    }
}

fn report_observer_error(e: &io::Error) {
    warn!("observer failed to write step: {e}");
}
