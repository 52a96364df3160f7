//! File logging example
//!
//! Demonstrates logging to console, text file and JSON-lines outputs at once,
//! each with its own level.
//!
//! Run with: cargo run --example file_logging

use logora::prelude::*;

fn main() -> Result<()> {
    println!("=== Logora - File Logging Example ===\n");

    let logger = Logger::builder()
        .level(LogLevel::Debug)
        .writer("console", ConsoleWriter::new())
        .output(Output::new("file", FileWriter::new("application.log")?).with_level(LogLevel::Info))
        .output(
            Output::new("json", JsonWriter::new("application.jsonl")?)
                .with_level(LogLevel::Warning),
        )
        .on_error(|error, _| eprintln!("output failed: {}", error))
        .build();

    logger.title("Startup");
    logger.info("Application started", ());
    logger.debug("Loading configuration...", ());
    logger.success("Configuration loaded", ());
    logger.warning("Using default settings for {0} options", [2]);
    logger.error("Failed to load optional plugin {0}", ["metrics"]);

    let worker = logger.scoped("Worker");
    for i in 1..=5 {
        worker.info("Processing item {0}/{1}", [i, 5]);
        if i == 3 {
            worker.warning("Item {0} took longer than expected", [i]);
        }
    }

    logger.success("All operations completed", ());

    // Flush to ensure all logs are written
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'application.jsonl' for file output");

    Ok(())
}
