//! Scoped logging example
//!
//! Demonstrates scoped loggers on several threads sharing one queue, a small
//! queue limit with a drop hook, and a logger described by a JSON document.
//!
//! Run with: cargo run --example scoped_logging

use logora::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const DOCUMENT: &str = r#"{
    "config": { "level": "debug", "queue_limit": { "bounded": 64 } },
    "outputs": [
        { "kind": "console", "date_banner": false }
    ]
}"#;

fn main() -> Result<()> {
    println!("=== Logora - Scoped Logging Example ===\n");

    let dropped = Arc::new(AtomicUsize::new(0));
    let dropped_hook = Arc::clone(&dropped);

    let logger = LoggerBuilder::from_json(DOCUMENT)?
        .on_drop(move |_| {
            dropped_hook.fetch_add(1, Ordering::Relaxed);
        })
        .build();

    let handles: Vec<_> = ["DB", "Auth", "Cache"]
        .into_iter()
        .map(|scope| {
            let scoped = logger.scoped(scope);
            thread::spawn(move || {
                for i in 0..40 {
                    scoped.info("request {0} handled", [i]);
                }
                scoped.success("{0} finished", [scope]);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    logger.flush()?;

    let metrics = logger.metrics();
    println!("\nWritten: {}", metrics.written_count());
    println!(
        "Dropped: {} (hook saw {})",
        metrics.dropped_count(),
        dropped.load(Ordering::Relaxed)
    );
    println!("Drop rate: {:.2}%", metrics.drop_rate());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
