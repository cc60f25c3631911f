use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for an [`InMemoryStore`](crate::InMemoryStore).
///
/// `reads` counts `count`, `find_one` and `find`; `writes` counts
/// `insert_one`, `find_one_and_replace` and `delete_many`. Calls are counted
/// whether or not they succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub reads: u64,
    pub writes: u64,
}

impl StoreStats {
    /// Total number of storage calls.
    pub fn total(&self) -> u64 {
        self.reads + self.writes
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    reads: AtomicU64,
    writes: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StoreStats {
        StoreStats {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
    }
}
