//! Five-stage pipelined engine.
//!
//! This module coordinates the pipelined execution mode. Fetch, decode,
//! execute, memory, and write-back run as five scoped threads connected by
//! one-slot latches; correctness rests on:
//! 1. **In-order commit:** A single chain of one-slot latches; write-back
//!    retires instructions in fetch order by construction.
//! 2. **Hazard stalls:** Decode holds an instruction back while any
//!    in-flight instruction writes one of its sources (no forwarding).
//! 3. **Squash:** Taken branches and jumps bump the squash epoch; younger
//!    wrong-path entries are discarded and fetch resumes at the target.
//! 4. **Cooperative shutdown:** A halt flag raised on the termination
//!    sentinel or on a fault; every blocking wait observes it and the
//!    stages drain and join cleanly.

pub mod hazards;
pub mod latches;
pub mod signals;
pub mod stages;

use std::sync::Mutex;
use std::thread;

use crate::common::error::SimError;
use crate::core::gpr::RegisterFile;
use crate::isa::abi;
use crate::memory::Memory;
use crate::stats::SimStats;

use self::hazards::Scoreboard;
use self::latches::{ExMemEntry, IdExEntry, IfIdEntry, Latch, MemWbEntry};
use self::signals::Signals;

/// State shared by the five stage workers.
pub(crate) struct Shared {
    pub memory: Mutex<Memory>,
    pub regs: Mutex<RegisterFile>,
    pub stats: Mutex<SimStats>,
    pub scoreboard: Scoreboard,
    pub signals: Signals,

    pub if_id: Latch<IfIdEntry>,
    pub id_ex: Latch<IdExEntry>,
    pub ex_mem: Latch<ExMemEntry>,
    pub mem_wb: Latch<MemWbEntry>,

    pub start_pc: u32,
    pub trace: bool,
}

impl Shared {
    fn new(memory: Memory, trace: bool) -> Self {
        let mut regs = RegisterFile::new();
        regs.write(abi::REG_SP, memory.initial_stack_pointer());
        let start_pc = memory.entry_point();
        Self {
            memory: Mutex::new(memory),
            regs: Mutex::new(regs),
            stats: Mutex::new(SimStats::default()),
            scoreboard: Scoreboard::new(),
            signals: Signals::new(),
            if_id: Latch::new(),
            id_ex: Latch::new(),
            ex_mem: Latch::new(),
            mem_wb: Latch::new(),
            start_pc,
            trace,
        }
    }

    /// Aborts the run on a fatal fault.
    ///
    /// Parks the error, prints the diagnostic with the faulting pc, and
    /// wakes every blocked stage so the pipeline winds down.
    pub(crate) fn abort(&self, pc: u32, err: SimError) {
        eprintln!("[!] fault at pc={:#010x}: {}", pc, err);
        self.signals.record_fault(err);
        self.signals.raise_halt();
        self.scoreboard.halt();
        self.if_id.close();
        self.id_ex.close();
        self.ex_mem.close();
        self.mem_wb.close();
    }
}

/// Result of a completed pipelined run.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Final register file.
    pub regs: RegisterFile,
    /// Memory after the run, including all committed stores.
    pub memory: Memory,
    /// Counters accumulated across the stages.
    pub stats: SimStats,
}

/// The pipelined engine.
pub struct Pipeline {
    shared: Shared,
}

impl Pipeline {
    /// Creates a pipeline over loaded memory.
    ///
    /// As in the interpreter, the pc starts at the loader-reported entry
    /// point and `sp` at the loader-reported initial stack pointer.
    pub fn new(memory: Memory, trace: bool) -> Self {
        Self {
            shared: Shared::new(memory, trace),
        }
    }

    /// Runs the five stages to completion and returns the final state.
    pub fn run(self) -> Result<PipelineOutcome, SimError> {
        let shared = &self.shared;
        thread::scope(|s| {
            s.spawn(|| stages::fetch_stage(shared));
            s.spawn(|| stages::decode_stage(shared));
            s.spawn(|| stages::execute_stage(shared));
            s.spawn(|| stages::mem_stage(shared));
            s.spawn(|| stages::wb_stage(shared));
        });

        if let Some(err) = self.shared.signals.take_fault() {
            return Err(err);
        }

        Ok(PipelineOutcome {
            regs: self.shared.regs.into_inner().unwrap(),
            memory: self.shared.memory.into_inner().unwrap(),
            stats: self.shared.stats.into_inner().unwrap(),
        })
    }
}
