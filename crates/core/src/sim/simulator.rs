//! Simulator front door: owns the loaded memory and picks the engine.

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::gpr::RegisterFile;
use crate::core::Cpu;
use crate::memory::Memory;
use crate::pipeline::Pipeline;
use crate::stats::SimStats;

/// Final architectural state of a completed run.
pub struct Report {
    /// Final register file.
    pub regs: RegisterFile,
    /// Memory after the run.
    pub memory: Memory,
    /// Accumulated counters.
    pub stats: SimStats,
    /// Final program counter; reported by the interpreter only (the
    /// pipelined engine has no single architectural pc at drain time).
    pub pc: Option<u32>,
}

/// Engine-selecting simulator.
pub struct Simulator {
    memory: Memory,
    config: Config,
}

impl Simulator {
    /// Creates a simulator over loaded memory.
    pub fn new(memory: Memory, config: &Config) -> Self {
        Self {
            memory,
            config: config.clone(),
        }
    }

    /// Runs to the termination sentinel with the configured engine.
    pub fn run(self) -> Result<Report, SimError> {
        let trace = self.config.general.trace;
        if self.config.general.pipelined {
            let outcome = Pipeline::new(self.memory, trace).run()?;
            Ok(Report {
                regs: outcome.regs,
                memory: outcome.memory,
                stats: outcome.stats,
                pc: None,
            })
        } else {
            let mut cpu = Cpu::new(self.memory, trace);
            cpu.run()?;
            let Cpu {
                regs,
                pc,
                memory,
                stats,
                ..
            } = cpu;
            Ok(Report {
                regs,
                memory,
                stats,
                pc: Some(pc),
            })
        }
    }
}
