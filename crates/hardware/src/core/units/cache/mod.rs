//! Set-Associative Cache.
//!
//! This module implements one configurable level of the cache hierarchy. It models:
//! 1. **Lookup:** Address split into tag and set index; parallel tag compare across the ways.
//! 2. **Replacement:** Approximate LRU using the per-cache access sequence number stamped on
//!    every hit and allocation.
//! 3. **Write Policy:** Write-back (dirty bit, write on eviction) or write-through (every write
//!    hit forwarded), combined with write-allocate or no-write-allocate on misses.
//! 4. **Chaining:** Each level owns its lower level; latencies of every level visited are summed.
//!
//! The returned latency covers the whole path, but a level's own `access_time` counter only
//! records its contribution: bus plus hit cycles on a hit, and one bus crossing for every
//! request it sends down.
//!
//! A cache tracks tags only. Data lives in the address space.

use std::fmt;

use crate::common::data::AccessType;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::soc::traits::Storage;
use crate::stats::StorageStats;

/// Cache block metadata (one per way, per set).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheBlock {
    /// Block holds a valid tag.
    pub valid: bool,
    /// Block was written since it was fetched (write-back only).
    pub dirty: bool,
    /// Address tag.
    pub tag: u64,
    /// Access sequence number of the last hit or allocation.
    pub access_counter: u64,
}

/// One cache level implementing [`Storage`].
pub struct Cache {
    config: CacheConfig,
    blocks: Vec<CacheBlock>,
    set_count: usize,
    ways: usize,
    offset_bits: u32,
    index_bits: u32,
    stats: StorageStats,
    lower: Box<dyn Storage>,
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.config.name)
            .field("sets", &self.set_count)
            .field("ways", &self.ways)
            .field("stats", &self.stats)
            .field("lower", &self.lower.name())
            .finish_non_exhaustive()
    }
}

impl Cache {
    /// Creates an empty cache in front of `lower`.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry, write policy and latency.
    /// * `lower` - The next level down, owned by this cache.
    ///
    /// # Errors
    ///
    /// Returns the geometry violation if `config` does not validate.
    pub fn new(config: &CacheConfig, lower: Box<dyn Storage>) -> Result<Self, ConfigError> {
        config.validate()?;
        let set_count = config.set_count();
        let ways = config.associativity;
        Ok(Self {
            config: config.clone(),
            blocks: vec![CacheBlock::default(); set_count * ways],
            set_count,
            ways,
            offset_bits: config.offset_bits(),
            index_bits: config.index_bits(),
            stats: StorageStats::default(),
            lower,
        })
    }

    /// Returns the configuration this level was built from.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Splits `addr` into `(tag, set_index)`.
    pub fn split_address(&self, addr: u64) -> (u64, usize) {
        let set = ((addr >> self.offset_bits) & ((1u64 << self.index_bits) - 1)) as usize;
        let tag = addr >> (self.offset_bits + self.index_bits);
        (tag, set)
    }

    /// Returns the ways of set `index`.
    pub fn set(&self, index: usize) -> &[CacheBlock] {
        let base = index * self.ways;
        &self.blocks[base..base + self.ways]
    }

    /// Returns every block, set-major.
    pub fn blocks(&self) -> &[CacheBlock] {
        &self.blocks
    }

    /// Returns the valid block holding `addr`, if any, without touching counters.
    pub fn probe(&self, addr: u64) -> Option<&CacheBlock> {
        let (tag, set) = self.split_address(addr);
        self.find_way(set, tag).map(|way| &self.blocks[set * self.ways + way])
    }

    /// Way of a valid block in `set` whose tag matches.
    fn find_way(&self, set: usize, tag: u64) -> Option<usize> {
        self.set(set).iter().position(|b| b.valid && b.tag == tag)
    }

    /// Way of an invalid block in `set`.
    fn find_empty(&self, set: usize) -> Option<usize> {
        self.set(set).iter().position(|b| !b.valid)
    }

    /// Reconstructs the block address from a tag and set index.
    fn block_address(&self, tag: u64, set: usize) -> u64 {
        (tag << (self.offset_bits + self.index_bits)) | ((set as u64) << self.offset_bits)
    }

    /// Evicts the least-recently-used way of `set`.
    ///
    /// A dirty victim in a write-back cache is written to the lower level first.
    ///
    /// # Returns
    ///
    /// `(way, latency)` where `latency` is the bus plus write-back cost, zero for clean victims.
    fn choose_victim(&mut self, set: usize) -> (usize, u64) {
        self.stats.replace_num += 1;
        let way = self
            .set(set)
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| b.access_counter)
            .map_or(0, |(way, _)| way);
        let idx = set * self.ways + way;
        let victim = self.blocks[idx];

        let mut time = 0;
        if victim.valid && victim.dirty && !self.config.write_through {
            let victim_addr = self.block_address(victim.tag, set);
            tracing::trace!(
                cache = %self.config.name,
                addr = format_args!("{victim_addr:#x}"),
                "write back dirty victim"
            );
            time += self.lower_request(victim_addr, self.config.block_size, AccessType::Write);
        }
        self.blocks[idx].valid = false;
        self.blocks[idx].dirty = false;
        (way, time)
    }

    /// Installs `tag` in `set` and fetches the block from the lower level.
    ///
    /// # Returns
    ///
    /// Latency of any victim write-back plus the bus and lower-level fetch.
    fn allocate(&mut self, set: usize, tag: u64, dirty: bool) -> u64 {
        let (way, mut time) = match self.find_empty(set) {
            Some(way) => (way, 0),
            None => self.choose_victim(set),
        };
        self.blocks[set * self.ways + way] = CacheBlock {
            valid: true,
            dirty,
            tag,
            access_counter: self.stats.access_counter,
        };
        self.stats.fetch_num += 1;
        let block_addr = self.block_address(tag, set);
        time += self.lower_request(block_addr, self.config.block_size, AccessType::Read);
        time
    }

    /// Forwards a write to the lower level; returns bus plus lower latency.
    fn forward_write(&mut self, addr: u64, bytes: usize) -> u64 {
        self.lower_request(addr, bytes, AccessType::Write)
    }

    /// Sends one request across the bus to the lower level.
    ///
    /// Only the bus crossing is charged to this level's `access_time`.
    fn lower_request(&mut self, addr: u64, bytes: usize, access: AccessType) -> u64 {
        let bus = self.config.latency.bus;
        let (_, lower_time) = self.lower.handle_request(addr, bytes, access);
        self.stats.access_time += bus;
        bus + lower_time
    }

    /// Whether a prefetch should follow this miss. No prefetcher is modelled.
    fn prefetch_decision(&self) -> bool {
        false
    }

    /// Issues prefetches after a miss at `addr`.
    fn prefetch(&mut self, _addr: u64) {}
}

impl Storage for Cache {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn handle_request(&mut self, addr: u64, bytes: usize, access: AccessType) -> (bool, u64) {
        self.stats.access_counter += 1;
        let (tag, set) = self.split_address(addr);
        let latency = self.config.latency;

        let (hit, time) = if let Some(way) = self.find_way(set, tag) {
            let idx = set * self.ways + way;
            self.blocks[idx].access_counter = self.stats.access_counter;
            let mut time = latency.bus + latency.hit;
            self.stats.access_time += time;
            if access == AccessType::Write {
                if self.config.write_through {
                    time += self.forward_write(addr, bytes);
                } else {
                    self.blocks[idx].dirty = true;
                }
            }
            (true, time)
        } else {
            self.stats.miss_num += 1;
            let time = match access {
                AccessType::Read => self.allocate(set, tag, false),
                AccessType::Write if self.config.write_allocate => {
                    let write_through = self.config.write_through;
                    let mut time = self.allocate(set, tag, !write_through);
                    if write_through {
                        time += self.forward_write(addr, bytes);
                    }
                    time
                }
                AccessType::Write => self.forward_write(addr, bytes),
            };
            if self.prefetch_decision() {
                self.prefetch(addr);
            }
            (false, time)
        };

        tracing::trace!(
            cache = %self.config.name,
            addr = format_args!("{addr:#x}"),
            ?access,
            hit,
            latency = time,
            "request"
        );
        (hit, time)
    }

    fn stats(&self) -> &StorageStats {
        &self.stats
    }

    fn lower(&self) -> Option<&dyn Storage> {
        Some(self.lower.as_ref())
    }
}
