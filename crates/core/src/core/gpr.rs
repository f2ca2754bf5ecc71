//! General-purpose register file.
//!
//! This module implements the 32-entry integer register file. It performs:
//! 1. **Storage:** Maintains registers `x0`-`x31` as 32-bit words.
//! 2. **Invariant Enforcement:** Register `x0` is hardwired to zero; reads
//!    return 0 and writes are dropped.
//! 3. **Debugging:** Snapshot and ABI-named dump utilities.

use crate::isa::abi;

/// The integer register file.
#[derive(Debug)]
pub struct RegisterFile {
    regs: [u32; 32],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all 32 register values.
    pub fn dump(&self) -> [u32; 32] {
        self.regs
    }

    /// Prints all registers with their ABI names to stdout.
    ///
    /// Registers appear in index order, two per line, in hex.
    pub fn print(&self) {
        for i in (0..32).step_by(2) {
            println!(
                "{:<4} = {:#010x}    {:<4} = {:#010x}",
                abi::name(i),
                self.read(i),
                abi::name(i + 1),
                self.read(i + 1)
            );
        }
    }
}
