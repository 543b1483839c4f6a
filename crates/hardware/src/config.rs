//! Configuration system for the out-of-order core.
//!
//! This module defines the structures that size the simulated machine. It provides:
//! 1. **Defaults:** Baseline capacities (16 architectural and 20 physical registers,
//!    IQ of 8, LSQ of 6, ROB of 16, 4096 data words).
//! 2. **Structures:** Sectioned config for general settings, the core and data memory.
//! 3. **Validation:** Rejection of capacities the pipeline cannot run with.
//!
//! Configuration is read from JSON with `Config::from_json`, or built with
//! `Config::default()`. Every capacity is fixed for the lifetime of a simulation.

use serde::{Deserialize, Serialize};

use crate::common::constants::{CODE_BASE, HANG_DETECTION_THRESHOLD, Word};
use crate::common::error::ConfigError;

/// Default configuration constants for the core.
mod defaults {
    /// Architectural general-purpose registers (`R0`..`R15`).
    pub const ARCH_REGS: usize = 16;

    /// Physical registers backing the rename table.
    ///
    /// Must exceed `ARCH_REGS` so the free list starts non-empty.
    pub const PHYS_REGS: usize = 20;

    /// Issue queue entries shared by all functional units.
    pub const ISSUE_QUEUE_SIZE: usize = 8;

    /// Load/store queue entries.
    pub const LSQ_SIZE: usize = 6;

    /// Reorder buffer entries.
    pub const ROB_SIZE: usize = 16;

    /// Branch target buffer entries.
    pub const BTB_SIZE: usize = 256;

    /// Data memory size in words.
    pub const DATA_WORDS: usize = 4096;
}

/// Root configuration structure.
///
/// Every section and field is optional in JSON; missing values take their defaults.
///
/// # Examples
///
/// ```
/// use oosim_core::config::Config;
///
/// let json = r#"{
///     "core": { "phys_regs": 24, "rob_size": 32 },
///     "memory": { "data_words": 1024 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.core.phys_regs, 24);
/// assert_eq!(config.core.rob_size, 32);
/// assert_eq!(config.core.arch_regs, 16);
/// assert_eq!(config.memory.data_words, 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Register files, queues and predictor sizing
    pub core: CoreConfig,
    /// Data memory configuration
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configured machine can run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InsufficientPhysRegs`] when there are not more
    /// physical than architectural registers, and [`ConfigError::ZeroCapacity`]
    /// for any zero-sized structure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.core;
        let capacities = [
            ("architectural register file", c.arch_regs),
            ("issue queue", c.issue_queue_size),
            ("load/store queue", c.lsq_size),
            ("reorder buffer", c.rob_size),
            ("branch target buffer", c.btb_size),
            ("data memory", self.memory.data_words),
        ];
        if let Some((name, _)) = capacities.iter().find(|(_, size)| *size == 0) {
            return Err(ConfigError::ZeroCapacity(*name));
        }
        if c.phys_regs <= c.arch_regs {
            return Err(ConfigError::InsufficientPhysRegs {
                phys: c.phys_regs,
                arch: c.arch_regs,
            });
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Address of the first instruction
    #[serde(default = "GeneralConfig::default_code_base")]
    pub code_base: Word,

    /// Cycles `run_to_completion` may spend before reporting a hang
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    fn default_code_base() -> Word {
        CODE_BASE
    }

    fn default_max_cycles() -> u64 {
        HANG_DETECTION_THRESHOLD
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            code_base: CODE_BASE,
            max_cycles: HANG_DETECTION_THRESHOLD,
        }
    }
}

/// Core structure sizing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CoreConfig {
    /// Number of architectural registers
    #[serde(default = "CoreConfig::default_arch_regs")]
    pub arch_regs: usize,

    /// Number of physical registers
    #[serde(default = "CoreConfig::default_phys_regs")]
    pub phys_regs: usize,

    /// Issue queue capacity
    #[serde(default = "CoreConfig::default_issue_queue_size")]
    pub issue_queue_size: usize,

    /// Load/store queue capacity
    #[serde(default = "CoreConfig::default_lsq_size")]
    pub lsq_size: usize,

    /// Reorder buffer capacity
    #[serde(default = "CoreConfig::default_rob_size")]
    pub rob_size: usize,

    /// Branch target buffer entries
    #[serde(default = "CoreConfig::default_btb_size")]
    pub btb_size: usize,
}

impl CoreConfig {
    fn default_arch_regs() -> usize {
        defaults::ARCH_REGS
    }

    fn default_phys_regs() -> usize {
        defaults::PHYS_REGS
    }

    fn default_issue_queue_size() -> usize {
        defaults::ISSUE_QUEUE_SIZE
    }

    fn default_lsq_size() -> usize {
        defaults::LSQ_SIZE
    }

    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            arch_regs: defaults::ARCH_REGS,
            phys_regs: defaults::PHYS_REGS,
            issue_queue_size: defaults::ISSUE_QUEUE_SIZE,
            lsq_size: defaults::LSQ_SIZE,
            rob_size: defaults::ROB_SIZE,
            btb_size: defaults::BTB_SIZE,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Data memory size in words; valid addresses are `0..data_words`
    #[serde(default = "MemoryConfig::default_data_words")]
    pub data_words: usize,
}

impl MemoryConfig {
    fn default_data_words() -> usize {
        defaults::DATA_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: defaults::DATA_WORDS,
        }
    }
}
