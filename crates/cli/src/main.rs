//! W32 simulator CLI.
//!
//! This binary provides a single entry point for the simulator and its tools. It performs:
//! 1. **Run:** Load a raw program image and execute it until HALT, a fault, or a cycle limit.
//! 2. **Assemble:** Turn assembler source into a raw little-endian image.
//! 3. **Disassemble:** List an image as addresses, words and mnemonics.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use w32sim_core::Simulator;
use w32sim_core::common::Fault;
use w32sim_core::config::Config;
use w32sim_core::isa::{asm, disasm};
use w32sim_core::sim::loader;
use w32sim_core::sim::RunOutcome;
use w32sim_core::sim::trace::{self, AnsiTracer, JsonTracer};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "W32 instruction-set simulator",
    long_about = "Run a raw program image, or assemble and disassemble one.\n\nExamples:\n  sim asm demo.s -o demo.bin\n  sim run demo.bin --trace ansi --stats\n  sim disasm demo.bin\n\nLogging goes to stderr and is controlled by RUST_LOG (default: warn)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a raw program image.
    Run {
        /// Program image (raw little-endian words).
        image: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the load address (and initial PC).
        #[arg(long, value_parser = parse_u32)]
        load_address: Option<u32>,

        /// Stop after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print every step.
        #[arg(long, value_enum)]
        trace: Option<TraceFormat>,

        /// Print statistics after the run.
        #[arg(long)]
        stats: bool,

        /// Dump memory after the run, as ADDR:LEN (hex or decimal).
        #[arg(long, value_parser = parse_dump)]
        dump: Vec<(u32, usize)>,
    },

    /// Assemble source into a raw image.
    Asm {
        /// Assembler source file.
        input: PathBuf,

        /// Output image (defaults to the input with a `.bin` extension).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Disassemble a raw image.
    Disasm {
        /// Program image.
        image: PathBuf,

        /// Address of the first word in the listing.
        #[arg(long, value_parser = parse_u32, default_value = "0x3000")]
        load_address: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TraceFormat {
    /// Colored disassembly and register table.
    Ansi,
    /// One JSON object per step.
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            image,
            config,
            load_address,
            max_cycles,
            trace,
            stats,
            dump,
        } => cmd_run(&RunArgs {
            image,
            config,
            load_address,
            max_cycles,
            trace,
            stats,
            dump,
        }),
        Commands::Asm { input, output } => cmd_asm(&input, output),
        Commands::Disasm {
            image,
            load_address,
        } => cmd_disasm(&image, load_address),
    };

    if let Err(msg) = result {
        eprintln!("\n[!] FATAL: {msg}");
        process::exit(1);
    }
}

/// Options of the `run` subcommand.
struct RunArgs {
    image: PathBuf,
    config: Option<PathBuf>,
    load_address: Option<u32>,
    max_cycles: Option<u64>,
    trace: Option<TraceFormat>,
    stats: bool,
    dump: Vec<(u32, usize)>,
}

/// Builds the configuration from the optional file and the command-line overrides.
fn build_config(args: &RunArgs) -> Result<Config, String> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("could not read '{}': {e}", path.display()))?;
            Config::from_json(&text).map_err(|e| e.to_string())?
        }
        None => Config::default(),
    };
    if let Some(addr) = args.load_address {
        config.system.load_address = addr;
    }
    if args.max_cycles.is_some() {
        config.general.max_cycles = args.max_cycles;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Loads an image and runs it; on a fault, dumps state and exits with code 1.
fn cmd_run(args: &RunArgs) -> Result<(), String> {
    let config = build_config(args)?;
    let image = loader::load_binary(&args.image).map_err(|e| e.to_string())?;

    let mut sim = Simulator::new(&config);
    sim.load_program(&image).map_err(|e| e.to_string())?;

    let result = match args.trace {
        Some(TraceFormat::Ansi) => sim.run_observed(&mut AnsiTracer::new(io::stdout())),
        Some(TraceFormat::Json) => sim.run_observed(&mut JsonTracer::new(io::stdout())),
        None => sim.run(),
    };

    match result {
        Ok(RunOutcome::Halted { cycles }) => {
            tracing::info!("halted after {cycles} cycles");
        }
        Ok(RunOutcome::CycleLimit { cycles }) => {
            eprintln!("\n[*] Cycle limit reached after {cycles} cycles");
        }
        Err(fault) => report_fault(&sim, fault),
    }

    let mut stdout = io::stdout().lock();
    for &(addr, len) in &args.dump {
        trace::dump_memory(&mut stdout, &sim.cpu.bus, addr, len, args.trace.is_some())
            .map_err(|e| format!("dump {addr:#010x}:{len}: {e}"))?;
    }
    drop(stdout);

    if args.stats {
        sim.cpu.stats.print();
    }
    Ok(())
}

/// Prints the fault and register file to stderr, then exits with code 1.
fn report_fault(sim: &Simulator, fault: Fault) -> ! {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "\n[!] FATAL: {fault}");
    let _ = sim.cpu.dump_state(&mut stderr);
    let _ = stderr.flush();
    process::exit(1);
}

fn cmd_asm(input: &Path, output: Option<PathBuf>) -> Result<(), String> {
    let source = fs::read_to_string(input)
        .map_err(|e| format!("could not read '{}': {e}", input.display()))?;
    let image = asm::assemble_to_bytes(&source).map_err(|e| format!("{}: {e}", input.display()))?;
    let output = output.unwrap_or_else(|| input.with_extension("bin"));
    fs::write(&output, &image)
        .map_err(|e| format!("could not write '{}': {e}", output.display()))?;
    println!(
        "[*] {} -> {} ({} words)",
        input.display(),
        output.display(),
        image.len() / 4
    );
    Ok(())
}

fn cmd_disasm(image: &Path, load_address: u32) -> Result<(), String> {
    let bytes = loader::load_binary(image).map_err(|e| e.to_string())?;
    let mut stdout = io::stdout().lock();
    for (addr, word, text) in disasm::disassemble_image(&bytes, load_address) {
        writeln!(stdout, "{addr:#010x}:  {word:#010x}  {text}").map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Parses a decimal or `0x`-prefixed hexadecimal `u32`.
fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{s}': {e}"))
}

/// Parses `ADDR:LEN`.
fn parse_dump(s: &str) -> Result<(u32, usize), String> {
    let (addr, len) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ADDR:LEN, got '{s}'"))?;
    Ok((parse_u32(addr)?, parse_u32(len)? as usize))
}
