//! Backing memory: the terminal storage level.
//!
//! Every request hits and costs the configured bus plus access latency. There is
//! no capacity bookkeeping beyond the access and latency counters.

use crate::common::data::AccessType;
use crate::config::LatencyConfig;
use crate::soc::traits::Storage;
use crate::stats::StorageStats;

/// Fixed-latency main memory.
#[derive(Clone, Debug)]
pub struct BackingMemory {
    latency: LatencyConfig,
    stats: StorageStats,
}

impl BackingMemory {
    /// Creates a backing memory with the given latency.
    ///
    /// # Arguments
    ///
    /// * `latency` - Bus and access latency in cycles.
    pub fn new(latency: LatencyConfig) -> Self {
        Self {
            latency,
            stats: StorageStats::default(),
        }
    }
}

impl Storage for BackingMemory {
    fn name(&self) -> &str {
        "memory"
    }

    fn handle_request(&mut self, _addr: u64, _bytes: usize, _access: AccessType) -> (bool, u64) {
        let time = self.latency.hit + self.latency.bus;
        self.stats.access_counter += 1;
        self.stats.access_time += time;
        (true, time)
    }

    fn stats(&self) -> &StorageStats {
        &self.stats
    }

    fn lower(&self) -> Option<&dyn Storage> {
        None
    }
}
