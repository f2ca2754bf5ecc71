//! RV32 functional simulator library.
//!
//! This crate implements a functional simulator for a 32-bit RISC-V integer
//! core (RV32I plus the M multiply/divide subset) with the following:
//! 1. **ISA:** Decoding into six instruction formats and execution semantics
//!    for the base integer and multiply/divide operations.
//! 2. **Memory:** A flat byte-addressable buffer with word/half/byte codecs
//!    and bounds checking, plus the layout published by the loaders.
//! 3. **Engines:** A single-threaded interpreter and a five-stage pipelined
//!    engine with hazard stalls and squash-on-branch.
//! 4. **Simulation:** ELF/listing/map loaders, configuration, and statistics
//!    collection.

/// Common types shared across the crate (errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core: interpreter, register file, ALU and load/store semantics.
pub mod core;
/// Instruction set: field extraction, decoding, ABI names.
pub mod isa;
/// Flat byte-addressable memory and the loader-populated layout.
pub mod memory;
/// Five-stage pipelined engine (latches, hazards, stage workers).
pub mod pipeline;
/// Program loaders and the engine-selecting simulator front door.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Interpreter CPU; holds the register file, pc, and memory.
pub use crate::core::Cpu;
/// Crate-wide fatal error type.
pub use crate::common::error::SimError;
/// Engine-selecting front door; construct with `Simulator::new`.
pub use crate::sim::simulator::Simulator;
