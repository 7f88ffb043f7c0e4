//! Simulation statistics collection and reporting.
//!
//! This module tracks execution metrics for the simulator. It provides:
//! 1. **Throughput:** Total cycles, retired instructions, and derived host speed (MIPS).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, stack, control).
//! 3. **Control flow:** Jumps taken and not taken, calls and returns.
//! 4. **Traps:** Host trap invocations, including unmapped vectors.

use std::io::{self, Write};
use std::time::Instant;

/// Simulation statistics structure tracking all execution metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Fetch loop iterations.
    pub cycles: u64,
    /// Number of instructions that completed without faulting.
    pub instructions_retired: u64,

    /// Count of register and immediate ALU instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of `lea` instructions retired.
    pub inst_lea: u64,
    /// Count of push/pop instructions retired.
    pub inst_stack: u64,

    /// Conditional and unconditional jumps that were taken.
    pub branches_taken: u64,
    /// Conditional jumps that fell through.
    pub branches_not_taken: u64,
    /// Calls executed.
    pub calls: u64,
    /// Returns executed.
    pub returns: u64,

    /// Trap instructions executed, mapped or not.
    pub traps: u64,
    /// Traps whose vector had no handler.
    pub unmapped_traps: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_lea: 0,
            inst_stack: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            calls: 0,
            returns: 0,
            traps: 0,
            unmapped_traps: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"control"`, `"traps"`.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "control", "traps"];

const RULE_HEAVY: &str = "==========================================================";
const RULE_LIGHT: &str = "----------------------------------------------------------";

impl SimStats {
    /// Writes the requested statistics sections to `out`.
    ///
    /// Pass an empty slice to write every section.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the report.
    /// * `sections` - Section names from [`STATS_SECTIONS`], or empty for all.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_sections<W: Write>(&self, out: &mut W, sections: &[&str]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.contains(&s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / instr) * 100.0;

        if want("summary") {
            let mips = if seconds > 0.0 {
                (self.instructions_retired as f64 / seconds) / 1_000_000.0
            } else {
                0.0
            };
            writeln!(out, "\n{RULE_HEAVY}")?;
            writeln!(out, "W32 SIMULATION STATISTICS")?;
            writeln!(out, "{RULE_HEAVY}")?;
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(out, "sim_mips                 {mips:.2}")?;
            writeln!(out, "{RULE_LIGHT}")?;
        }
        if want("instruction_mix") {
            writeln!(out, "INSTRUCTION MIX")?;
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.lea", self.inst_lea),
                ("op.stack", self.inst_stack),
            ] {
                writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n))?;
            }
            writeln!(out, "{RULE_LIGHT}")?;
        }
        if want("control") {
            let total = self.branches_taken + self.branches_not_taken;
            let rate = if total > 0 {
                100.0 * (self.branches_taken as f64 / total as f64)
            } else {
                0.0
            };
            writeln!(out, "CONTROL FLOW")?;
            writeln!(out, "  jump.taken             {}", self.branches_taken)?;
            writeln!(out, "  jump.not_taken         {}", self.branches_not_taken)?;
            writeln!(out, "  jump.taken_rate        {rate:.2}%")?;
            writeln!(out, "  call                   {}", self.calls)?;
            writeln!(out, "  ret                    {}", self.returns)?;
            writeln!(out, "{RULE_LIGHT}")?;
        }
        if want("traps") {
            writeln!(out, "TRAPS")?;
            writeln!(out, "  trap.total             {}", self.traps)?;
            writeln!(out, "  trap.unmapped          {}", self.unmapped_traps)?;
        }
        writeln!(out, "{RULE_HEAVY}")
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_sections(&mut stdout, &[]) {
            tracing::warn!("failed to print statistics: {e}");
        }
    }
}
