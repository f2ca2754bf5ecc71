//! Fatal error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Error Representation:** One variant per fatal condition the core can
//!    encounter (memory bounds, decoding, division, loading).
//! 2. **Error Handling:** Integration with the standard Rust error traits for
//!    system-level reporting.

use std::fmt;

/// Fatal simulator errors.
///
/// Every variant terminates the run; the reporting site prints the current
/// program counter alongside the error so the faulting instruction can be
/// identified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// A load or store fell outside the memory region.
    ///
    /// Raised when `addr + width` exceeds the configured memory size. The
    /// associated values are the faulting address and the access width in
    /// bytes.
    MemoryOutOfRange { addr: u32, width: u32 },

    /// An instruction word could not be decoded or executed.
    ///
    /// Raised for the all-zero word, an unknown opcode, or a valid opcode
    /// with an unrecognized funct3/funct7 combination. The associated value
    /// is the instruction encoding.
    UnsupportedInstruction { word: u32 },

    /// DIV, DIVU, REM, or REMU with a zero divisor.
    ///
    /// The associated value is the instruction encoding.
    DivideByZero { word: u32 },

    /// The program image could not be loaded.
    ///
    /// Raised for I/O failures and malformed ELF, listing, or map inputs.
    /// The simulator does not start.
    Loader(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::MemoryOutOfRange { addr, width } => {
                write!(f, "MemoryOutOfRange(addr={:#010x}, width={})", addr, width)
            }
            SimError::UnsupportedInstruction { word } => {
                write!(f, "UnsupportedInstruction({:#010x})", word)
            }
            SimError::DivideByZero { word } => write!(f, "DivideByZero({:#010x})", word),
            SimError::Loader(msg) => write!(f, "Loader({})", msg),
        }
    }
}

impl std::error::Error for SimError {}
