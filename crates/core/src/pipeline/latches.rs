//! Pipeline latches for inter-stage communication.
//!
//! This module defines the one-slot rendezvous latch connecting adjacent
//! pipeline stages and the entry types carried between the five stages:
//! Fetch → Decode → Execute → Memory → Write-Back.
//!
//! 1. **Rendezvous Discipline:** A producer may fill the latch only when it
//!    is empty; a consumer may drain it only when it is full. Both block on
//!    a condition variable otherwise.
//! 2. **Shutdown:** A closed latch unblocks everyone; sends fail and
//!    receives drain the remaining entry, then report exhaustion.
//! 3. **Trap Propagation:** Entries carry faults downstream so they are
//!    raised only if the instruction turns out to be on the committed path.

use std::sync::{Condvar, Mutex};

use crate::common::error::SimError;
use crate::isa::instruction::Instruction;

/// One-slot rendezvous channel between two pipeline stages.
pub struct Latch<T> {
    slot: Mutex<Slot<T>>,
    cond: Condvar,
}

struct Slot<T> {
    entry: Option<T>,
    closed: bool,
}

impl<T> Default for Latch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Latch<T> {
    /// Creates an empty, open latch.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                entry: None,
                closed: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Hands an entry to the consumer, blocking while the latch is full.
    ///
    /// # Returns
    ///
    /// `true` on success; `false` when the latch was closed, in which case
    /// the entry is dropped and the producer should wind down.
    pub fn send(&self, entry: T) -> bool {
        let mut slot = self.slot.lock().unwrap();
        while slot.entry.is_some() && !slot.closed {
            slot = self.cond.wait(slot).unwrap();
        }
        if slot.closed {
            return false;
        }
        slot.entry = Some(entry);
        self.cond.notify_all();
        true
    }

    /// Takes the entry, blocking while the latch is empty.
    ///
    /// # Returns
    ///
    /// The entry, or `None` once the latch is closed and drained.
    pub fn recv(&self) -> Option<T> {
        let mut slot = self.slot.lock().unwrap();
        while slot.entry.is_none() && !slot.closed {
            slot = self.cond.wait(slot).unwrap();
        }
        let entry = slot.entry.take();
        self.cond.notify_all();
        entry
    }

    /// Closes the latch, waking any blocked producer and consumer.
    ///
    /// Idempotent; an entry already latched remains available for one final
    /// `recv`.
    pub fn close(&self) {
        let mut slot = self.slot.lock().unwrap();
        slot.closed = true;
        self.cond.notify_all();
    }
}

/// Entry in the Fetch → Decode latch.
///
/// Carries the raw word and the squash epoch it was fetched under. A fetch
/// fault travels in `trap` instead of aborting immediately, since the fetch
/// may be on the wrong path of an unresolved branch.
#[derive(Clone, Debug)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding (zero when `trap` is set).
    pub word: u32,
    /// Squash epoch at fetch time.
    pub epoch: u64,
    /// Fault raised during fetch, if any.
    pub trap: Option<SimError>,
}

/// Entry in the Decode → Execute latch.
///
/// Exactly one of `inst` and `trap` is set. A decoded entry has already
/// passed the hazard gate and holds the scoreboard claim for its
/// destination register.
#[derive(Clone, Debug)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub word: u32,
    /// Squash epoch at fetch time.
    pub epoch: u64,
    /// Decoded instruction.
    pub inst: Option<Instruction>,
    /// Fault carried from fetch or decode, if any.
    pub trap: Option<SimError>,
}

/// Memory-stage work selected by execute.
#[derive(Clone, Copy, Debug)]
pub enum MemOp {
    /// No memory access; `value` goes straight to write-back.
    Alu { value: u32 },
    /// Load from `addr`, extended per `funct3`.
    Load { funct3: u32, addr: u32 },
    /// Store the low bits of `value` at `addr` per `funct3`.
    Store { funct3: u32, addr: u32, value: u32 },
}

/// Instruction category, recorded at execute and tallied at retirement.
#[derive(Clone, Copy, Debug)]
pub enum RetireKind {
    Alu,
    Load,
    Store,
    Branch { taken: bool },
    Jump,
}

/// Entry in the Execute → Memory latch.
#[derive(Clone, Debug)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub word: u32,
    /// Destination register, if the instruction writes one (never x0).
    pub rd: Option<usize>,
    /// Work for the memory stage.
    pub op: MemOp,
    /// Category for retirement statistics.
    pub kind: RetireKind,
}

/// Entry in the Memory → Write-Back latch.
#[derive(Clone, Debug)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub word: u32,
    /// Destination register, if the instruction writes one (never x0).
    pub rd: Option<usize>,
    /// Value to commit to `rd`.
    pub value: u32,
    /// Category for retirement statistics.
    pub kind: RetireKind,
}
