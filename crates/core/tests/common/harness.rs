//! Helpers that assemble word lists into memory and run the engines.

use rv32sim_core::core::Cpu;
use rv32sim_core::memory::Memory;
use rv32sim_core::pipeline::{Pipeline, PipelineOutcome};
use rv32sim_core::SimError;

/// Default memory size for tests: 64 KiB keeps runs fast while leaving room
/// for data traffic well away from the code.
pub const TEST_MEMORY: usize = 64 * 1024;

/// Writes `words` into fresh memory starting at `base` and marks `base` as
/// the entry point.
pub fn assemble(base: u32, words: &[u32]) -> Memory {
    let mut mem = Memory::new(TEST_MEMORY);
    for (i, &word) in words.iter().enumerate() {
        mem.store_word(base + (i as u32) * 4, word).unwrap();
    }
    mem.set_entry_point(base);
    mem
}

/// Runs a program at address 0 through the interpreter to completion.
pub fn run_interpreter(words: &[u32]) -> Cpu {
    let mut cpu = Cpu::new(assemble(0, words), false);
    cpu.run().unwrap();
    cpu
}

/// Runs a program at address 0 through the interpreter, expecting a fault.
pub fn run_interpreter_err(words: &[u32]) -> SimError {
    let mut cpu = Cpu::new(assemble(0, words), false);
    cpu.run().unwrap_err()
}

/// Runs a program at address 0 through the pipelined engine to completion.
pub fn run_pipeline(words: &[u32]) -> PipelineOutcome {
    Pipeline::new(assemble(0, words), false).run().unwrap()
}

/// Runs a program at address 0 through the pipelined engine, expecting a
/// fault.
pub fn run_pipeline_err(words: &[u32]) -> SimError {
    Pipeline::new(assemble(0, words), false).run().unwrap_err()
}
