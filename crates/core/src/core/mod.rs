//! CPU core: interpreter loop and architectural state.
//!
//! This module owns the single-threaded execution engine. Each step fetches
//! one word, decodes it, and executes exactly one architectural instruction;
//! the pipelined engine in `crate::pipeline` reuses the same ALU and
//! load/store semantics so the two engines commit identical results.

pub mod alu;
mod execute;
pub mod gpr;
pub mod lsu;

use crate::common::error::SimError;
use crate::isa::abi;
use crate::isa::decode::decode;
use crate::isa::TERMINATOR;
use crate::memory::Memory;
use crate::stats::SimStats;

use self::alu::AluError;
use self::gpr::RegisterFile;

/// Maps an ALU fault onto the crate error type, attaching the instruction
/// encoding for the diagnostic.
pub(crate) fn alu_fault(word: u32, e: AluError) -> SimError {
    match e {
        AluError::DivideByZero => SimError::DivideByZero { word },
        AluError::Unsupported => SimError::UnsupportedInstruction { word },
    }
}

/// The interpreter CPU.
///
/// Owns the register file, program counter, and memory. The program counter
/// and stack pointer are initialized from the values the loader stored in
/// memory.
pub struct Cpu {
    pub regs: RegisterFile,
    pub pc: u32,
    pub trace: bool,
    pub memory: Memory,
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU over loaded memory.
    ///
    /// The pc starts at the loader-reported entry point and `sp` at the
    /// loader-reported initial stack pointer.
    pub fn new(memory: Memory, trace: bool) -> Self {
        let mut regs = RegisterFile::new();
        regs.write(abi::REG_SP, memory.initial_stack_pointer());
        Self {
            pc: memory.entry_point(),
            regs,
            trace,
            memory,
            stats: SimStats::default(),
        }
    }

    /// Overrides the program counter.
    pub fn set_pc(&mut self, addr: u32) {
        self.pc = addr;
    }

    /// Overrides the stack pointer.
    pub fn set_sp(&mut self, addr: u32) {
        self.regs.write(abi::REG_SP, addr);
    }

    /// Fetches, decodes, and executes one instruction.
    ///
    /// # Returns
    ///
    /// `Ok(true)` after a normal step, `Ok(false)` when the fetched word is
    /// the termination sentinel (which is not executed; the pc stays at the
    /// sentinel's address), or a fatal error.
    pub fn step(&mut self) -> Result<bool, SimError> {
        let word = self.memory.load_word(self.pc)?;
        if word == TERMINATOR {
            if self.trace {
                eprintln!("IF  pc={:#010x} ret -- halting", self.pc);
            }
            return Ok(false);
        }

        let inst = decode(word)?;
        if self.trace {
            eprintln!("EX  pc={:#010x} inst={:#010x}", self.pc, word);
        }
        self.execute(word, inst)?;
        self.stats.instructions_retired += 1;
        Ok(true)
    }

    /// Runs until the termination sentinel is fetched.
    ///
    /// On a fatal error the diagnostic is printed with the faulting pc
    /// before the error propagates.
    pub fn run(&mut self) -> Result<(), SimError> {
        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(err) => {
                    eprintln!("[!] fault at pc={:#010x}: {}", self.pc, err);
                    return Err(err);
                }
            }
        }
    }

    /// Prints the pc and the ABI-named register file to stdout.
    pub fn dump_state(&self) {
        println!("pc   = {:#010x}", self.pc);
        self.regs.print();
    }
}
