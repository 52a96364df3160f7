//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Every entry is delivered exactly once under concurrent load
//! - Per-thread call order survives the shared queue
//! - Drops are counted precisely when the queue overflows
//! - Scoped loggers on many threads share one consumer

use logora::writers::MemoryWriter;
use logora::{FlushMode, LogLevel, Logger, Output, QueueLimit};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

fn parse(line: &str) -> (usize, usize) {
    let mut parts = line.split(':');
    let thread = parts.next().and_then(|p| p.parse().ok()).expect("thread id");
    let seq = parts.next().and_then(|p| p.parse().ok()).expect("sequence");
    (thread, seq)
}

/// Each thread's entries must arrive complete and in the order they were logged
#[test]
fn test_concurrent_delivery_preserves_per_thread_order() {
    let writer = MemoryWriter::new();
    let logger = Logger::builder()
        .queue_limit(QueueLimit::Unbounded)
        .output(Output::new("memory", writer.clone()).with_level(LogLevel::Debug))
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.debug("{0}:{1}", [t, i]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let rendered = writer.rendered();
    assert_eq!(rendered.len(), THREADS * PER_THREAD);

    let mut last_seen: HashMap<usize, usize> = HashMap::new();
    for line in &rendered {
        let (thread, seq) = parse(line);
        if let Some(previous) = last_seen.insert(thread, seq) {
            assert!(seq > previous, "thread {} went from {} to {}", thread, previous, seq);
        }
    }
    assert_eq!(last_seen.len(), THREADS);
}

/// Accepted plus dropped writes always account for every attempt
#[test]
fn test_overflow_accounting_under_load() {
    let writer = MemoryWriter::new();
    let drops = Arc::new(AtomicUsize::new(0));
    let drops_clone = Arc::clone(&drops);

    let logger = Logger::builder()
        .flush_mode(FlushMode::Manual)
        .queue_limit(QueueLimit::Bounded(100))
        .writer("memory", writer.clone())
        .on_drop(move |_| {
            drops_clone.fetch_add(1, Ordering::Relaxed);
        })
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info("{0}:{1}", [t, i]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let metrics = logger.metrics();
    assert_eq!(metrics.enqueued_count(), 100);
    assert_eq!(metrics.dropped_count() as usize, THREADS * PER_THREAD - 100);
    assert_eq!(drops.load(Ordering::Relaxed), THREADS * PER_THREAD - 100);

    logger.flush().expect("Failed to flush");
    assert_eq!(writer.len(), 100);
}

/// Scoped loggers created on different threads feed the same outputs
#[test]
fn test_scoped_loggers_across_threads() {
    let writer = MemoryWriter::new();
    let logger = Logger::builder()
        .queue_limit(QueueLimit::Unbounded)
        .writer("memory", writer.clone())
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let scoped = logger.scoped(format!("worker-{}", t));
            thread::spawn(move || {
                for i in 0..50 {
                    scoped.info("tick {0}", [i]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let entries = writer.entries();
    assert_eq!(entries.len(), THREADS * 50);

    let mut per_scope: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        *per_scope.entry(entry.scope.expect("scoped")).or_default() += 1;
    }
    assert_eq!(per_scope.len(), THREADS);
    assert!(per_scope.values().all(|&count| count == 50));
}

/// A panicking output under load never stops delivery to its neighbour
#[test]
fn test_failure_isolation_under_load() {
    let healthy = MemoryWriter::new();
    let failures = Arc::new(AtomicUsize::new(0));
    let failures_clone = Arc::clone(&failures);

    let logger = Logger::builder()
        .queue_limit(QueueLimit::Unbounded)
        .writer("failing", MemoryWriter::failing())
        .writer("healthy", healthy.clone())
        .on_error(move |_, _| {
            failures_clone.fetch_add(1, Ordering::Relaxed);
        })
        .build();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    logger.warning("{0}:{1}", [t, i]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    assert_eq!(healthy.len(), 400);
    assert_eq!(failures.load(Ordering::Relaxed), 400);
}

/// Rapid bursts followed by shutdown leave nothing behind
#[test]
fn test_rapid_burst_then_shutdown() {
    let writer = MemoryWriter::new();
    let logger = Logger::builder()
        .queue_limit(QueueLimit::Unbounded)
        .writer("memory", writer.clone())
        .build();

    for burst in 0..10 {
        for i in 0..100 {
            logger.info("burst {0} message {1}", [burst, i]);
        }
        thread::sleep(Duration::from_millis(1));
    }

    assert!(logger.shutdown(Duration::from_secs(5)));
    assert_eq!(writer.len(), 1000);
    assert_eq!(logger.pending_len(), 0);
}
