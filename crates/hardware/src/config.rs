//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline constants (stack pointer, cache presets, memory latency).
//! 2. **Structures:** Hierarchical config for general settings and the cache hierarchy.
//! 3. **Validation:** Geometry checks that every cache level must pass before it is built.
//!
//! Configuration is supplied as JSON (`Config::from_json_str`, `Config::from_file`) or
//! taken from `Config::default()`, which reproduces the three-level preset hierarchy.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Initial stack pointer (2 GiB), above any loaded segment.
    pub const STACK_POINTER: u64 = crate::common::constants::DEFAULT_STACK_POINTER;

    /// Cache block size shared by every preset level (64 bytes).
    pub const BLOCK_SIZE: usize = 64;

    /// Associativity shared by every preset level (8 ways).
    pub const ASSOCIATIVITY: usize = 8;

    /// L1 capacity (32 KiB).
    pub const L1_SIZE: usize = 32 * 1024;
    /// L1 hit latency in cycles.
    pub const L1_HIT: u64 = 1;

    /// L2 capacity (256 KiB).
    pub const L2_SIZE: usize = 256 * 1024;
    /// L2 hit latency in cycles.
    pub const L2_HIT: u64 = 8;

    /// L3 capacity (8 MiB).
    pub const L3_SIZE: usize = 8 * 1024 * 1024;
    /// L3 hit latency in cycles.
    pub const L3_HIT: u64 = 20;

    /// Backing memory access latency in cycles.
    pub const MEMORY_HIT: u64 = 100;

    /// Bus latency of every preset level.
    pub const BUS: u64 = 0;
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Cache hierarchy configuration
    pub cache: HierarchyConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, or the first geometry violation.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the file cannot be read or parsed, or a geometry violation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Checks every cache level's geometry.
    ///
    /// # Errors
    ///
    /// The first violation found, in level order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.levels.iter().try_for_each(CacheConfig::validate)
    }

    /// Pretty-printed JSON form of this configuration.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Emit a per-stage instruction trace through `tracing` at debug level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial stack pointer.
    #[serde(default = "GeneralConfig::default_stack_pointer")]
    pub stack_pointer: u64,

    /// Stop with an error after this many cycles; `None` runs until exit.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

impl GeneralConfig {
    /// Returns the default initial stack pointer.
    fn default_stack_pointer() -> u64 {
        defaults::STACK_POINTER
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            stack_pointer: defaults::STACK_POINTER,
            max_cycles: None,
        }
    }
}

/// Bus and access latency of one storage level, in cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatencyConfig {
    /// Cost of crossing the bus to this level.
    #[serde(default)]
    pub bus: u64,
    /// Cost of a hit in this level.
    pub hit: u64,
}

impl LatencyConfig {
    /// Backing memory preset (hit latency 100).
    pub const fn memory() -> Self {
        Self {
            bus: defaults::BUS,
            hit: defaults::MEMORY_HIT,
        }
    }
}

/// The ordered cache levels and the backing memory below them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HierarchyConfig {
    /// Cache levels, closest to the core first. May be empty.
    #[serde(default = "HierarchyConfig::default_levels")]
    pub levels: Vec<CacheConfig>,

    /// Backing memory latency.
    #[serde(default = "LatencyConfig::memory")]
    pub memory: LatencyConfig,
}

impl HierarchyConfig {
    /// Returns the L1/L2/L3 presets.
    fn default_levels() -> Vec<CacheConfig> {
        vec![CacheConfig::l1(), CacheConfig::l2(), CacheConfig::l3()]
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            levels: Self::default_levels(),
            memory: LatencyConfig::memory(),
        }
    }
}

/// Individual cache level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Name used in statistics and traces
    pub name: String,

    /// Total cache size in bytes
    pub size: usize,

    /// Block (line) size in bytes
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: usize,

    /// Associativity (ways per set)
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: usize,

    /// Write hits propagate to the lower level immediately instead of marking the block dirty
    #[serde(default)]
    pub write_through: bool,

    /// Write misses allocate a block instead of bypassing this level
    #[serde(default = "CacheConfig::default_write_allocate")]
    pub write_allocate: bool,

    /// Bus and hit latency
    pub latency: LatencyConfig,
}

impl CacheConfig {
    /// Returns the default block size in bytes.
    fn default_block_size() -> usize {
        defaults::BLOCK_SIZE
    }

    /// Returns the default associativity.
    fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Write-allocate is on unless disabled.
    fn default_write_allocate() -> bool {
        true
    }

    /// Builds a write-back, write-allocate level with the preset block size and associativity.
    fn preset(name: &str, size: usize, hit: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            block_size: defaults::BLOCK_SIZE,
            associativity: defaults::ASSOCIATIVITY,
            write_through: false,
            write_allocate: true,
            latency: LatencyConfig {
                bus: defaults::BUS,
                hit,
            },
        }
    }

    /// 32 KiB, 64 B blocks, 8-way, hit latency 1.
    pub fn l1() -> Self {
        Self::preset("L1", defaults::L1_SIZE, defaults::L1_HIT)
    }

    /// 256 KiB, 64 B blocks, 8-way, hit latency 8.
    pub fn l2() -> Self {
        Self::preset("L2", defaults::L2_SIZE, defaults::L2_HIT)
    }

    /// 8 MiB, 64 B blocks, 8-way, hit latency 20.
    pub fn l3() -> Self {
        Self::preset("L3", defaults::L3_SIZE, defaults::L3_HIT)
    }

    /// Number of sets: `size / (block_size * associativity)`.
    ///
    /// Zero when the set width is zero or does not fit in a `usize`.
    pub const fn set_count(&self) -> usize {
        match self.block_size.checked_mul(self.associativity) {
            Some(set_bytes) if set_bytes != 0 => self.size / set_bytes,
            _ => 0,
        }
    }

    /// Width of the block-offset field of an address.
    pub const fn offset_bits(&self) -> u32 {
        self.block_size.trailing_zeros()
    }

    /// Width of the set-index field of an address.
    pub const fn index_bits(&self) -> u32 {
        self.set_count().trailing_zeros()
    }

    /// Enforces `size == block_size * associativity * set_count` with power-of-two
    /// block size and set count.
    ///
    /// # Errors
    ///
    /// The first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("size", self.size),
            ("block_size", self.block_size),
            ("associativity", self.associativity),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero {
                    name: self.name.clone(),
                    field,
                });
            }
        }
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                name: self.name.clone(),
                field: "block_size",
                value: self.block_size,
            });
        }
        let sets = self.set_count();
        let covered = self
            .block_size
            .checked_mul(self.associativity)
            .and_then(|set_bytes| set_bytes.checked_mul(sets));
        if sets == 0 || covered != Some(self.size) {
            return Err(ConfigError::Geometry {
                name: self.name.clone(),
                size: self.size,
                block_size: self.block_size,
                associativity: self.associativity,
            });
        }
        if !sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                name: self.name.clone(),
                field: "set_count",
                value: sets,
            });
        }
        Ok(())
    }
}
