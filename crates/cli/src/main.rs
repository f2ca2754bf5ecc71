//! RV32 functional simulator CLI.
//!
//! This binary is the single entry point for simulation runs. It performs:
//! 1. **Loading:** Reads the ELF image named on the command line into the
//!    simulated memory.
//! 2. **Engine selection:** Runs the interpreter by default, or the
//!    five-stage pipelined engine with `--pipelined`.
//! 3. **Reporting:** Exit code 0 on normal termination; on loader failure or
//!    a fatal execution error, prints the diagnostic and exits non-zero.

use clap::Parser;
use std::process;

use rv32sim_core::config::Config;
use rv32sim_core::memory::Memory;
use rv32sim_core::sim::loader;
use rv32sim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "RV32I/M functional simulator",
    long_about = "Load a 32-bit RISC-V ELF image and execute it until the \
terminating `ret` word.\n\nExamples:\n  rv32sim program.elf\n  rv32sim --pipelined --trace program.elf"
)]
struct Cli {
    /// ELF image to execute.
    elf: String,

    /// Run the five-stage pipelined engine instead of the interpreter.
    #[arg(long)]
    pipelined: bool,

    /// Trace each stage's work to stderr.
    #[arg(long)]
    trace: bool,

    /// Dump the register file after the run.
    #[arg(long)]
    dump_regs: bool,

    /// Print run statistics after the run.
    #[arg(long)]
    stats: bool,

    /// JSON configuration file (flags override its settings).
    #[arg(long)]
    config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not read config '{}': {}", path, e);
                process::exit(1);
            });
            Config::from_json(&text).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: {}", e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };
    config.general.pipelined |= cli.pipelined;
    config.general.trace |= cli.trace;
    config.general.dump_registers |= cli.dump_regs;

    let mut memory = Memory::new(config.memory.size);
    if let Err(e) = loader::load_elf(&mut memory, &cli.elf) {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    }

    println!(
        "[*] {}: entry={:#010x} sp={:#010x} engine={}",
        cli.elf,
        memory.entry_point(),
        memory.initial_stack_pointer(),
        if config.general.pipelined {
            "pipelined"
        } else {
            "interpreter"
        }
    );

    let report = match Simulator::new(memory, &config).run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    };

    if let Some(pc) = report.pc {
        println!("[*] halted at pc={:#010x}", pc);
    } else {
        println!("[*] halted");
    }
    if config.general.dump_registers {
        report.regs.print();
    }
    if cli.stats {
        report.stats.print();
    }
}
