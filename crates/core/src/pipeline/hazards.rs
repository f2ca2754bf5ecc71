//! Data hazard detection.
//!
//! This module implements the scoreboard that keeps the pipeline consistent
//! when data dependencies exist between in-flight instructions. It provides:
//! 1. **Hazard Detection:** Decode stalls while any in-flight instruction
//!    writes a register the incoming instruction reads (read-after-write).
//! 2. **Stall Resolution:** There is no operand forwarding; a stall clears
//!    when the writer completes write-back and drops its claim.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};

/// Pending-writer scoreboard shared by decode, execute, and write-back.
///
/// Each claimed destination register holds a count of in-flight writers;
/// x0 never carries a claim. Claims are taken by decode when an instruction
/// passes the hazard gate and dropped at write-back, or at execute when a
/// squashed instruction is discarded.
pub struct Scoreboard {
    pending: Mutex<[u32; 32]>,
    cond: Condvar,
    halted: AtomicBool,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    /// Creates a scoreboard with no pending writers.
    pub fn new() -> Self {
        Self {
            pending: Mutex::new([0; 32]),
            cond: Condvar::new(),
            halted: AtomicBool::new(false),
        }
    }

    /// Blocks until neither source register has a pending writer.
    ///
    /// # Arguments
    ///
    /// * `rs1` / `rs2` - Source registers of the instruction about to enter
    ///   execute, when the format carries them.
    ///
    /// # Returns
    ///
    /// `Some(stalled)` once both sources are clean, where `stalled` reports
    /// whether the caller had to wait at least once; `None` when the
    /// pipeline halted while waiting.
    pub fn wait_ready(&self, rs1: Option<usize>, rs2: Option<usize>) -> Option<bool> {
        let busy = |pending: &[u32; 32], r: Option<usize>| match r {
            Some(idx) if idx != 0 => pending[idx] > 0,
            _ => false,
        };

        let mut pending = self.pending.lock().unwrap();
        let mut stalled = false;
        loop {
            if self.halted.load(Ordering::SeqCst) {
                return None;
            }
            if !busy(&pending, rs1) && !busy(&pending, rs2) {
                return Some(stalled);
            }
            stalled = true;
            pending = self.cond.wait(pending).unwrap();
        }
    }

    /// Registers an in-flight write to `rd`.
    pub fn claim(&self, rd: usize) {
        let mut pending = self.pending.lock().unwrap();
        pending[rd] += 1;
    }

    /// Drops an in-flight write to `rd` and wakes a stalled decode.
    pub fn release(&self, rd: usize) {
        let mut pending = self.pending.lock().unwrap();
        pending[rd] -= 1;
        self.cond.notify_all();
    }

    /// Aborts any current and future waits; used during shutdown.
    pub fn halt(&self) {
        let _pending = self.pending.lock().unwrap();
        self.halted.store(true, Ordering::SeqCst);
        self.cond.notify_all();
    }
}
