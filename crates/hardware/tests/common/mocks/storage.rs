//! A terminal storage level that records every request it receives.
//!
//! Used below a cache under test to count the traffic the cache sends down.
//! The log is shared through `Rc<RefCell<_>>` so it stays readable after the
//! level has been boxed and handed to the cache.

use std::cell::RefCell;
use std::rc::Rc;

use pipesim_core::common::AccessType;
use pipesim_core::soc::Storage;
use pipesim_core::stats::StorageStats;

/// One request seen by [`RecordingStorage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    pub addr: u64,
    pub bytes: usize,
    pub access: AccessType,
}

pub type RequestLog = Rc<RefCell<Vec<Request>>>;

pub struct RecordingStorage {
    latency: u64,
    log: RequestLog,
    stats: StorageStats,
}

impl RecordingStorage {
    /// Creates a level that always hits after `latency` cycles.
    pub fn new(latency: u64) -> (Self, RequestLog) {
        let log = RequestLog::default();
        let storage = Self {
            latency,
            log: Rc::clone(&log),
            stats: StorageStats::default(),
        };
        (storage, log)
    }

    /// Boxed level and its log.
    pub fn boxed(latency: u64) -> (Box<dyn Storage>, RequestLog) {
        let (storage, log) = Self::new(latency);
        (Box::new(storage), log)
    }
}

impl Storage for RecordingStorage {
    fn name(&self) -> &str {
        "recorder"
    }

    fn handle_request(&mut self, addr: u64, bytes: usize, access: AccessType) -> (bool, u64) {
        self.log.borrow_mut().push(Request {
            addr,
            bytes,
            access,
        });
        self.stats.access_counter += 1;
        self.stats.access_time += self.latency;
        (true, self.latency)
    }

    fn stats(&self) -> &StorageStats {
        &self.stats
    }

    fn lower(&self) -> Option<&dyn Storage> {
        None
    }
}

/// Number of logged writes.
pub fn writes(log: &RequestLog) -> usize {
    log.borrow()
        .iter()
        .filter(|r| r.access == AccessType::Write)
        .count()
}

/// Number of logged reads.
pub fn reads(log: &RequestLog) -> usize {
    log.borrow()
        .iter()
        .filter(|r| r.access == AccessType::Read)
        .count()
}
