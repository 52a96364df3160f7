//! Logger metrics for observability
//!
//! Counters describing what happened to every write the dispatcher queued:
//! delivered, dropped on overflow, or failed inside a writer.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// Shared by a logger and every scoped logger derived from it.
///
/// # Example
///
/// ```
/// use logora::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_written();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.written_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries built by logging calls
    entries_created: AtomicU64,

    /// Writes accepted into the queue
    enqueued: AtomicU64,

    /// Writes a writer completed successfully
    written: AtomicU64,

    /// Writes discarded because the queue was full
    dropped: AtomicU64,

    /// Writes whose writer returned an error or panicked
    write_failures: AtomicU64,

    /// Flush cycles started
    flush_cycles: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_created: AtomicU64::new(0),
            enqueued: AtomicU64::new(0),
            written: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            flush_cycles: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_created(&self) -> u64 {
        self.entries_created.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_cycles(&self) -> u64 {
        self.flush_cycles.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_entry(&self) -> u64 {
        self.entries_created.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped write, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush_cycle(&self) -> u64 {
        self.flush_cycles.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0) of all attempted writes
    ///
    /// Returns 0.0 if nothing has been attempted.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.enqueued_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.entries_created.store(0, Ordering::Relaxed);
        self.enqueued.store(0, Ordering::Relaxed);
        self.written.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.flush_cycles.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            entries_created: AtomicU64::new(self.entries_created()),
            enqueued: AtomicU64::new(self.enqueued_count()),
            written: AtomicU64::new(self.written_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            write_failures: AtomicU64::new(self.write_failures()),
            flush_cycles: AtomicU64::new(self.flush_cycles()),
        }
    }
}
