//! Shared pipeline control signals.
//!
//! This module holds the cross-stage coordination state: the halt flag, the
//! squash epoch with its redirect target, and the fault slot. It provides:
//! 1. **Termination:** A dedicated halt flag, raised when the termination
//!    sentinel commits or a stage faults; every blocking wait observes it.
//! 2. **Control Hazards:** A monotonically increasing squash epoch bumped by
//!    execute on taken branches and jumps, paired with the redirect target
//!    fetch resumes from. Entries tagged with an older epoch are wrong-path
//!    and get dropped.
//! 3. **Fault Reporting:** The first fatal error is parked here and returned
//!    by the coordinator after the stages join.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};

use crate::common::error::SimError;

/// Control signals shared by all five stages.
pub struct Signals {
    halt: AtomicBool,
    epoch: AtomicU64,
    redirect: Mutex<Option<(u32, u64)>>,
    redirect_cond: Condvar,
    fault: Mutex<Option<SimError>>,
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}

impl Signals {
    /// Creates the signal block in its initial state (epoch 0, not halted).
    pub fn new() -> Self {
        Self {
            halt: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            redirect: Mutex::new(None),
            redirect_cond: Condvar::new(),
            fault: Mutex::new(None),
        }
    }

    /// Raises the halt flag and wakes a fetch parked on the redirect wait.
    pub fn raise_halt(&self) {
        let _redirect = self.redirect.lock().unwrap();
        self.halt.store(true, Ordering::SeqCst);
        self.redirect_cond.notify_all();
    }

    /// Returns whether the halt flag is raised.
    pub fn halted(&self) -> bool {
        self.halt.load(Ordering::SeqCst)
    }

    /// Returns the current squash epoch.
    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Bumps the squash epoch and posts the pc fetch must resume from.
    ///
    /// Called by execute when a branch is taken or a jump resolves.
    ///
    /// # Returns
    ///
    /// The new epoch; entries fetched under older epochs are wrong-path.
    pub fn redirect(&self, target: u32) -> u64 {
        let next = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let mut redirect = self.redirect.lock().unwrap();
        *redirect = Some((target, next));
        self.redirect_cond.notify_all();
        next
    }

    /// Takes a posted redirect without blocking.
    pub fn take_redirect(&self) -> Option<(u32, u64)> {
        self.redirect.lock().unwrap().take()
    }

    /// Blocks until a redirect is posted or the pipeline halts.
    ///
    /// Fetch parks here after forwarding a fetch fault or the termination
    /// sentinel: both outcomes are decided downstream, either by a redirect
    /// (the instruction was wrong-path) or by the halt flag.
    ///
    /// # Returns
    ///
    /// The redirect, or `None` once halted.
    pub fn wait_redirect(&self) -> Option<(u32, u64)> {
        let mut redirect = self.redirect.lock().unwrap();
        loop {
            if self.halt.load(Ordering::SeqCst) {
                return None;
            }
            if let Some(r) = redirect.take() {
                return Some(r);
            }
            redirect = self.redirect_cond.wait(redirect).unwrap();
        }
    }

    /// Parks the first fatal error; later faults are ignored.
    pub fn record_fault(&self, err: SimError) {
        let mut fault = self.fault.lock().unwrap();
        if fault.is_none() {
            *fault = Some(err);
        }
    }

    /// Takes the recorded fault, if any.
    pub fn take_fault(&self) -> Option<SimError> {
        self.fault.lock().unwrap().take()
    }
}
