//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Defines the standard ABI aliases for the 32 general-purpose registers and
//! the well-known indices the simulator touches directly.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address, ra).
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;

/// ABI names for registers x0-x31, in index order.
pub const NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for a register index.
///
/// # Arguments
///
/// * `idx` - Register index (0-31).
#[inline]
pub fn name(idx: usize) -> &'static str {
    NAMES[idx]
}
