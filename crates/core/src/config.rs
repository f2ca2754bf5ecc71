//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline constants (memory size, stack sentinel).
//! 2. **Structures:** Hierarchical config for general behavior and memory.
//!
//! Configuration is supplied as JSON via `Config::from_json` or use
//! `Config::default()` for the CLI.

use serde::Deserialize;

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Total size of simulated memory (1 MiB).
    ///
    /// Both code and data live in this region; accesses beyond it raise a
    /// memory-range fault.
    pub const MEMORY_SIZE: usize = 1024 * 1024;
}

/// General run behavior.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Trace each stage's work to stderr.
    pub trace: bool,
    /// Run the five-stage pipelined engine instead of the interpreter.
    pub pipelined: bool,
    /// Dump the register file after the run completes.
    pub dump_registers: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            pipelined: false,
            dump_registers: false,
        }
    }
}

/// Memory sizing.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Size of the flat memory region in bytes.
    pub size: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
        }
    }
}

/// Root configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General run behavior.
    pub general: GeneralConfig,
    /// Memory sizing.
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their defaults, so a partial document such as
    /// `{"memory": {"size": 65536}}` is accepted.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        serde_json::from_str(text).map_err(|e| SimError::Loader(format!("bad config: {}", e)))
    }
}
