//! Tokio runtime example
//!
//! Demonstrates running flush cycles as tasks on a tokio runtime instead of a
//! dedicated worker thread.
//!
//! Run with: cargo run --example async_logging --features tokio-runtime

use logora::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Logora - Tokio Runtime Example ===\n");

    let logger = Logger::builder()
        .level(LogLevel::Debug)
        .tokio_runtime(tokio::runtime::Handle::current())
        .writer("console", ConsoleWriter::new())
        .build();

    let mut tasks = Vec::new();
    for task_id in 0..5 {
        let logger = logger.scoped(format!("task-{}", task_id));
        tasks.push(tokio::spawn(async move {
            for i in 0..5 {
                logger.info("Message {0}", [i]);
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }));
    }

    for task in tasks {
        task.await.expect("task panicked");
    }

    // Give the last flush task a chance to run before shutting down
    tokio::task::yield_now().await;
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
