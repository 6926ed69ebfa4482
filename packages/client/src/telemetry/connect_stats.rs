//! Lock-free connection statistics with cache-padded atomic counters
//!
//! One [`ConnectStats`] is shared by every operation started from the same
//! endpoint. Counters are only ever incremented; read them through
//! [`ConnectStats::snapshot`].

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

/// Thread-safe connection statistics.
///
/// Each counter is cache-padded to prevent false sharing between operations
/// running on different worker threads.
#[derive(Debug, Default)]
pub struct ConnectStats {
    /// Connect operations started
    pub operations_started: CachePadded<AtomicUsize>,
    /// Operations that delivered a connection
    pub operations_succeeded: CachePadded<AtomicUsize>,
    /// Operations that failed after exhausting every candidate
    pub operations_failed: CachePadded<AtomicUsize>,
    /// Operations cancelled by the caller
    pub operations_cancelled: CachePadded<AtomicUsize>,
    /// Individual connection attempts started
    pub attempts_started: CachePadded<AtomicUsize>,
    /// Individual connection attempts that failed
    pub attempts_failed: CachePadded<AtomicUsize>,
    /// In-flight attempts abandoned because another won or the caller cancelled
    pub attempts_cancelled: CachePadded<AtomicUsize>,
    /// Resolved addresses dropped for an unsupported or disabled family
    pub addresses_dropped: CachePadded<AtomicUsize>,
}

/// Immutable snapshot of connection statistics at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectStatsSnapshot {
    pub operations_started: usize,
    pub operations_succeeded: usize,
    pub operations_failed: usize,
    pub operations_cancelled: usize,
    pub attempts_started: usize,
    pub attempts_failed: usize,
    pub attempts_cancelled: usize,
    pub addresses_dropped: usize,
}

impl ConnectStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn add(counter: &CachePadded<AtomicUsize>, n: usize) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn incr(counter: &CachePadded<AtomicUsize>) {
        Self::add(counter, 1);
    }

    /// Read every counter with relaxed ordering.
    ///
    /// Counters are read one by one, so a snapshot taken while operations
    /// run may mix values from slightly different instants.
    pub fn snapshot(&self) -> ConnectStatsSnapshot {
        ConnectStatsSnapshot {
            operations_started: self.operations_started.load(Ordering::Relaxed),
            operations_succeeded: self.operations_succeeded.load(Ordering::Relaxed),
            operations_failed: self.operations_failed.load(Ordering::Relaxed),
            operations_cancelled: self.operations_cancelled.load(Ordering::Relaxed),
            attempts_started: self.attempts_started.load(Ordering::Relaxed),
            attempts_failed: self.attempts_failed.load(Ordering::Relaxed),
            attempts_cancelled: self.attempts_cancelled.load(Ordering::Relaxed),
            addresses_dropped: self.addresses_dropped.load(Ordering::Relaxed),
        }
    }
}

impl ConnectStatsSnapshot {
    /// Operations that reached a terminal result.
    pub fn operations_settled(&self) -> usize {
        self.operations_succeeded + self.operations_failed + self.operations_cancelled
    }

    /// Operations still running when the snapshot was taken.
    pub fn operations_in_progress(&self) -> usize {
        self.operations_started
            .saturating_sub(self.operations_settled())
    }

    /// Percentage of settled operations that delivered a connection.
    pub fn success_rate(&self) -> f64 {
        let settled = self.operations_settled();
        if settled == 0 {
            0.0
        } else {
            (self.operations_succeeded as f64 / settled as f64) * 100.0
        }
    }

    /// Average number of attempts started per settled operation.
    pub fn attempts_per_operation(&self) -> f64 {
        let settled = self.operations_settled();
        if settled == 0 {
            0.0
        } else {
            self.attempts_started as f64 / settled as f64
        }
    }
}
