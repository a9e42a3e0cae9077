//! Pipelined RISC-V simulator CLI.
//!
//! This binary provides the entry point for running programs on the simulator. It performs:
//! 1. **Batch run:** Load an RV64 ELF, run it to the exit syscall and print statistics.
//! 2. **Step mode:** Advance one cycle per Enter, showing the instruction in Execute.
//! 3. **Config dump:** Print the effective default configuration as JSON.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pipesim_core::Config;
use pipesim_core::common::SimError;
use pipesim_core::isa::decode::decode;
use pipesim_core::sim::Simulator;
use pipesim_core::sim::loader;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-level pipelined RV64 simulator with a cache hierarchy",
    long_about = "Run a statically linked RV64 ELF on a four-stage pipeline backed by an L1/L2/L3 cache chain.\n\nExamples:\n  pipesim run program.elf\n  pipesim run program.elf --config caches.json --no-stats\n  pipesim run program.elf --step\n  pipesim config > caches.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an ELF executable until it exits.
    Run {
        /// ELF executable to load.
        elf: PathBuf,

        /// Trace every pipeline stage and log at debug level.
        #[arg(short, long)]
        debug: bool,

        /// JSON configuration file (defaults to the built-in L1/L2/L3 hierarchy).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Abort after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Single-step one cycle at a time.
        #[arg(short, long)]
        step: bool,

        /// Do not print statistics on exit.
        #[arg(long)]
        no_stats: bool,
    },

    /// Print the default configuration as JSON.
    Config,
}

/// Outcome of a step-mode command.
enum StepAction {
    Step,
    Registers,
    Continue,
    Quit,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            elf,
            debug,
            config,
            max_cycles,
            step,
            no_stats,
        } => {
            init_tracing(debug);
            cmd_run(&elf, debug, config, max_cycles, step, no_stats);
        }
        Commands::Config => println!("{}", Config::default().to_json()),
    }
}

/// Installs the fmt subscriber; `RUST_LOG` takes precedence over the default level.
fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Loads the configuration and program, then runs in batch or step mode.
fn cmd_run(
    elf: &Path,
    debug: bool,
    config_path: Option<PathBuf>,
    max_cycles: Option<u64>,
    step: bool,
    no_stats: bool,
) {
    let mut config = match config_path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| fatal(&SimError::Config(e))),
        None => Config::default(),
    };
    config.general.trace_instructions |= debug;
    if max_cycles.is_some() {
        config.general.max_cycles = max_cycles;
    }

    let bytes = loader::load_binary(elf).unwrap_or_else(|e| fatal(&e));
    let mut sim = Simulator::from_elf(&config, &bytes).unwrap_or_else(|e| fatal(&e));
    println!("[*] Running {} from {:#x}", elf.display(), sim.cpu.pc);

    let result = if step {
        run_stepping(&mut sim)
    } else {
        sim.run().map(Some)
    };

    match result {
        Ok(Some(code)) => {
            println!("\n[*] Exit code {code}");
            if !no_stats {
                sim.cpu.stats.print(sim.cpu.hierarchy.as_ref());
            }
            let _ = io::stdout().flush();
            process::exit(code as i32);
        }
        Ok(None) => {
            println!("\n[*] Quit at cycle {}", sim.cpu.stats.cycles);
            if !no_stats {
                sim.cpu.stats.print(sim.cpu.hierarchy.as_ref());
            }
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            eprintln!("{}", sim.cpu.dump_state());
            process::exit(1);
        }
    }
}

/// Interactive loop: Enter steps, `r` dumps registers, `c` continues, `q` quits.
///
/// Returns `Ok(None)` when the user quits before the program exits.
fn run_stepping(sim: &mut Simulator) -> Result<Option<u64>, SimError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !sim.cpu.is_exit() {
        show_next(sim);
        print!("(step) ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(None),
        };
        match parse_step_command(&line) {
            StepAction::Step => sim.tick()?,
            StepAction::Registers => println!("{}", sim.cpu.regs.dump()),
            StepAction::Continue => return sim.run().map(Some),
            StepAction::Quit => return Ok(None),
        }
    }
    Ok(sim.take_exit())
}

/// Maps an input line to an action; anything unrecognised steps.
fn parse_step_command(line: &str) -> StepAction {
    match line.trim() {
        "r" => StepAction::Registers,
        "c" => StepAction::Continue,
        "q" => StepAction::Quit,
        _ => StepAction::Step,
    }
}

/// Prints the cycle count and the instruction in the Execute slot.
fn show_next(sim: &Simulator) {
    let cycles = sim.cpu.stats.cycles;
    match (sim.cpu.next_instruction_pc(), sim.cpu.pipeline.execute.as_ref()) {
        (Some(pc), Some(inst)) => println!("[{cycles:>8}] {pc:#010x}: {inst}"),
        _ => match &sim.cpu.pipeline.decode {
            Some(fetched) => match decode(fetched.raw) {
                Ok(inst) => println!("[{cycles:>8}] {:#010x}: {inst} (decode)", fetched.pc),
                Err(e) => println!("[{cycles:>8}] {:#010x}: <{e}>", fetched.pc),
            },
            None => println!("[{cycles:>8}] <bubble>"),
        },
    }
}

/// Reports an error raised before simulation starts and exits.
fn fatal(e: &SimError) -> ! {
    eprintln!("[!] FATAL: {e}");
    process::exit(1);
}
