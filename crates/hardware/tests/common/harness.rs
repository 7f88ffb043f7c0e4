use w32sim_core::Simulator;
use w32sim_core::common::{Fault, Reg};
use w32sim_core::config::Config;
use w32sim_core::core::Cpu;
use w32sim_core::core::cpu::HostTraps;
use w32sim_core::isa::asm::assemble;
use w32sim_core::sim::{RunOutcome, StepOutcome};

/// Cycle budget for harness runs, so a broken jump cannot hang the suite.
pub const DEFAULT_MAX_CYCLES: u64 = 10_000;

/// Initial stack pointer used by the harness: one past the last byte of memory.
pub const STACK_TOP: u32 = 0x4_0000;

pub struct TestContext {
    pub sim: Simulator<HostTraps<Vec<u8>>>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.general.max_cycles = Some(DEFAULT_MAX_CYCLES);
        config.general.initial_sp = Some(STACK_TOP);
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();

        Self {
            sim: Simulator::with_traps(config, HostTraps::new(Vec::new())),
        }
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Mutable convenience accessor for the CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    /// Loads instruction words at the configured load address.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        let image: Vec<u8> = instructions
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        self.sim
            .load_program(&image)
            .expect("program should fit in memory");
        self
    }

    /// Assembles `source` and loads it at the configured load address.
    pub fn load_asm(self, source: &str) -> Self {
        let words = assemble(source).expect("test program should assemble");
        self.load_program(&words)
    }

    pub fn set_reg(&mut self, reg: Reg, val: u32) {
        self.sim.cpu.regs.write(reg, val);
    }

    pub fn get_reg(&self, reg: Reg) -> u32 {
        self.sim.cpu.regs.read(reg)
    }

    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        self.sim.step()
    }

    /// Executes exactly `count` steps, panicking on a fault.
    pub fn step_n(&mut self, count: usize) {
        for i in 0..count {
            if let Err(fault) = self.sim.step() {
                panic!("step {i} faulted: {fault}");
            }
        }
    }

    pub fn run(&mut self) -> Result<RunOutcome, Fault> {
        self.sim.run()
    }

    /// Runs to HALT and returns the cycle count, panicking on anything else.
    pub fn run_to_halt(&mut self) -> u64 {
        match self.sim.run() {
            Ok(RunOutcome::Halted { cycles }) => cycles,
            other => panic!("Expected HALT, got {other:?}"),
        }
    }

    /// Bytes written to the console by `PUTC` traps.
    pub fn console_output(&self) -> &[u8] {
        self.sim.traps.console().sink()
    }

    pub fn load_word(&self, addr: u32) -> u32 {
        self.sim.cpu.bus.load::<u32>(addr).expect("address in range")
    }

    pub fn store_word(&mut self, addr: u32, val: u32) {
        self.sim
            .cpu
            .bus
            .store(addr, val)
            .expect("address in range");
    }
}
