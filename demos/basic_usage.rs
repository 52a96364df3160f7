//! Basic logger usage example
//!
//! Demonstrates console output, per-output levels and templated messages.
//!
//! Run with: cargo run --example basic_usage

use logora::prelude::*;
use logora::{info, success};

fn main() -> Result<()> {
    println!("=== Logora - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .level(LogLevel::Debug)
        .writer("console", ConsoleWriter::new())
        .build();

    logger.title("1. Logging every type");
    logger.debug("This is a debug message", ());
    logger.info("This is an info message", ());
    logger.success("This is a success message", ());
    logger.warning("This is a warning message", ());
    logger.error("This is an error message", ());
    logger.highlight("This is a highlighted message", ());
    logger.print("This is a raw line", ());
    logger.flush()?;

    logger.empty(1);
    logger.title("2. Templates");
    logger.info("User {0} logged in from {1}", ["alice", "10.0.0.1"]);
    info!(logger, "{0} items processed in {1}ms (cached: {2})", 128, 3.7, true);
    success!(logger, "Out-of-range placeholders stay visible: {0} {1}", "only one");
    logger.flush()?;

    println!("\n3. A stricter output:");
    let strict = Logger::builder()
        .output(Output::new("console", ConsoleWriter::new()).with_level(LogLevel::Warning))
        .build();
    strict.info("Info message (hidden)", ());
    strict.success("Success message (hidden)", ());
    strict.warning("Warning message (visible)", ());
    strict.highlight("Highlight ignores levels (visible)", ());
    strict.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
