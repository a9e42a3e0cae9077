//! Memory hierarchy construction.
//!
//! Builds the storage chain from configuration. It performs:
//! 1. **Validation:** Every level's geometry is checked before anything is built.
//! 2. **Chaining:** Levels are constructed bottom-up so each cache owns its successor,
//!    ending in the backing memory.

use crate::common::error::ConfigError;
use crate::config::HierarchyConfig;
use crate::core::units::cache::Cache;
use crate::soc::memory::backing::BackingMemory;
use crate::soc::traits::Storage;

/// Builds `levels[0] -> levels[1] -> ... -> memory` and returns the top level.
///
/// With no cache levels the backing memory itself is returned.
///
/// # Errors
///
/// The first geometry violation, in level order.
pub fn build_hierarchy(config: &HierarchyConfig) -> Result<Box<dyn Storage>, ConfigError> {
    for level in &config.levels {
        level.validate()?;
    }
    let mut chain: Box<dyn Storage> = Box::new(BackingMemory::new(config.memory));
    for level in config.levels.iter().rev() {
        chain = Box::new(Cache::new(level, chain)?);
    }
    Ok(chain)
}
