//! Step Observers.
//!
//! Observers receive one [`StepEvent`] after every retired instruction. They get
//! shared borrows scoped to that call and cannot mutate machine state. Two
//! renderers are provided:
//! 1. **`AnsiTracer`:** Disassembly plus a colored register table in which registers
//!    that changed during the step are highlighted.
//! 2. **`JsonTracer`:** One JSON object per line, for tooling.
//!
//! [`dump_memory`] renders a memory range as rows of eight bytes.

use std::io::{self, Write};

use serde::Serialize;

use crate::common::reg::{Reg, RegisterSnapshot};
use crate::isa::op::Instruction;
use crate::soc::Memory;

/// ANSI escape sequences used by the renderers.
pub mod ansi {
    /// Reset all attributes.
    pub const RESET: &str = "\x1b[0m";
    /// Register and address labels.
    pub const FG_RED: &str = "\x1b[38;5;203m";
    /// Values that changed during the step.
    pub const FG_CYAN: &str = "\x1b[38;5;73m";
    /// Unchanged values and rules.
    pub const FG_DIM: &str = "\x1b[38;5;250m";
    /// Table background.
    pub const BG_DARK: &str = "\x1b[48;5;235m";
}

/// Width of the horizontal rule, in characters.
const RULE_WIDTH: usize = 142;

/// Bytes per row in memory dumps.
const DUMP_ROW: usize = 8;

/// Everything an observer may look at after one step.
#[derive(Clone, Copy, Debug)]
pub struct StepEvent<'a> {
    /// Step number, starting at 1.
    pub cycle: u64,
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Raw instruction word.
    pub raw: u32,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Registers before the step.
    pub before: &'a RegisterSnapshot,
    /// Registers after the step.
    pub after: &'a RegisterSnapshot,
    /// Memory after the step.
    pub memory: &'a Memory,
}

/// Receives a notification for every retired instruction.
pub trait Observer {
    /// Called once per retired instruction.
    ///
    /// # Errors
    ///
    /// Output failures are reported to the caller, which logs them and keeps running.
    fn on_step(&mut self, event: &StepEvent<'_>) -> io::Result<()>;
}

impl<T: Observer + ?Sized> Observer for &mut T {
    fn on_step(&mut self, event: &StepEvent<'_>) -> io::Result<()> {
        (**self).on_step(event)
    }
}

/// Human-readable renderer with ANSI colors.
#[derive(Debug)]
pub struct AnsiTracer<W: Write> {
    out: W,
}

impl<W: Write> AnsiTracer<W> {
    /// Creates a tracer writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the tracer and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "{}{}{}",
            ansi::FG_DIM,
            "\u{2550}".repeat(RULE_WIDTH),
            ansi::RESET
        )
    }

    fn row(&mut self, regs: &[Reg], event: &StepEvent<'_>) -> io::Result<()> {
        for reg in regs {
            write!(
                self.out,
                "{}{}{:^12}{}|",
                ansi::BG_DARK,
                ansi::FG_RED,
                reg.name(),
                ansi::RESET
            )?;
        }
        writeln!(self.out)?;
        for &reg in regs {
            let value = event.after.get(reg);
            let color = if value == event.before.get(reg) {
                ansi::FG_DIM
            } else {
                ansi::FG_CYAN
            };
            write!(
                self.out,
                "{}{} {value:#010x} {}|",
                ansi::BG_DARK,
                color,
                ansi::RESET
            )?;
        }
        writeln!(self.out)
    }
}

impl<W: Write> Observer for AnsiTracer<W> {
    fn on_step(&mut self, event: &StepEvent<'_>) -> io::Result<()> {
        self.rule()?;
        writeln!(
            self.out,
            "{}{:#010x}{}  {:#010x}  {}",
            ansi::FG_RED,
            event.pc,
            ansi::RESET,
            event.raw,
            event.inst
        )?;
        let (gprs, special) = Reg::ALL.split_at(Reg::Pc.index());
        self.row(gprs, event)?;
        self.row(special, event)?;
        self.rule()?;
        self.out.flush()
    }
}

/// One JSON line per step.
#[derive(Serialize)]
struct JsonStep<'a> {
    cycle: u64,
    pc: u32,
    raw: u32,
    asm: String,
    inst: &'a Instruction,
    changed: Vec<(&'static str, u32)>,
    regs: &'a RegisterSnapshot,
}

/// Machine-readable renderer emitting newline-delimited JSON.
#[derive(Debug)]
pub struct JsonTracer<W: Write> {
    out: W,
}

impl<W: Write> JsonTracer<W> {
    /// Creates a tracer writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the tracer and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for JsonTracer<W> {
    fn on_step(&mut self, event: &StepEvent<'_>) -> io::Result<()> {
        let line = JsonStep {
            cycle: event.cycle,
            pc: event.pc,
            raw: event.raw,
            asm: event.inst.to_string(),
            inst: &event.inst,
            changed: event
                .before
                .changed(event.after)
                .map(|r| (r.name(), event.after.get(r)))
                .collect(),
            regs: event.after,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)
    }
}

/// Writes `len` bytes of memory starting at `addr`, eight bytes per row.
///
/// # Arguments
///
/// * `out` - Destination writer.
/// * `mem` - Memory to read.
/// * `addr` - First address.
/// * `len` - Number of bytes.
/// * `color` - Whether to emit ANSI escapes.
///
/// # Errors
///
/// Returns `InvalidInput` if the range is outside memory, or any write error.
pub fn dump_memory<W: Write>(
    out: &mut W,
    mem: &Memory,
    addr: u32,
    len: usize,
    color: bool,
) -> io::Result<()> {
    let bytes = mem
        .read_slice(addr, len)
        .map_err(|f| io::Error::new(io::ErrorKind::InvalidInput, f))?;
    let (label, body, reset) = if color {
        (ansi::FG_RED, ansi::FG_DIM, ansi::RESET)
    } else {
        ("", "", "")
    };
    for (i, chunk) in bytes.chunks(DUMP_ROW).enumerate() {
        let row = addr.wrapping_add((i * DUMP_ROW) as u32);
        write!(out, "{label}{row:#010x}{reset}{body} =")?;
        for b in chunk {
            write!(out, " {b:#04x}")?;
        }
        writeln!(out, "{reset}")?;
    }
    Ok(())
}
