//! Storage level trait for the memory hierarchy.
//!
//! This module defines the `Storage` trait implemented by every level of the
//! hierarchy. It provides:
//! 1. **Identification:** `name` for statistics and trace output.
//! 2. **Access:** `handle_request`, returning hit status and the latency of the whole path taken.
//! 3. **Inspection:** Per-level counters and the next lower level, for reporting and tests.
//!
//! Levels form a chain (`L1 -> L2 -> L3 -> memory`); each cache owns its successor
//! and the backing memory terminates the chain.

use crate::common::data::AccessType;
use crate::stats::StorageStats;

/// A level of the memory hierarchy.
pub trait Storage {
    /// Returns a short name for this level (e.g., `"L1"`, `"memory"`).
    fn name(&self) -> &str;

    /// Services one request and any traffic it causes in lower levels.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the request.
    /// * `bytes` - Request width in bytes.
    /// * `access` - Read or write.
    ///
    /// # Returns
    ///
    /// `(hit, latency)` where `latency` sums every level visited.
    fn handle_request(&mut self, addr: u64, bytes: usize, access: AccessType) -> (bool, u64);

    /// Returns the cumulative counters for this level.
    fn stats(&self) -> &StorageStats;

    /// Returns the next lower level, or `None` for the terminal level.
    fn lower(&self) -> Option<&dyn Storage>;
}

/// Iterator over a storage chain from the given level down to the terminal one.
#[derive(Clone, Copy)]
pub struct Levels<'a> {
    next: Option<&'a dyn Storage>,
}

impl std::fmt::Debug for Levels<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Levels")
            .field("next", &self.next.map(Storage::name))
            .finish()
    }
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a dyn Storage;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.lower();
        Some(current)
    }
}

/// Walks the chain starting at `top`.
pub fn levels(top: &dyn Storage) -> Levels<'_> {
    Levels { next: Some(top) }
}
