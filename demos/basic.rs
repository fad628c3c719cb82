//! Basic console logging example.
//!
//! Run with:
//! ```bash
//! cargo run --example basic
//! ```

use rotolog::{Flags, Level, Logger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The default logger writes to stdout with date, time and microseconds
    rotolog::info!("service starting, pid %d", std::process::id());
    rotolog::debugln!("arguments: ", format!("{:?}", std::env::args().collect::<Vec<_>>()));

    rotolog::set_level(Level::Warn);
    rotolog::info!("this is below the threshold and is dropped");
    rotolog::warn!("disk usage at %.1f%%", 91.25);

    // Standalone logger on stderr with the caller's file and line
    let logger = Logger::new(std::io::stderr());
    logger.set_flags(Flags::TIME | Flags::SHORT_FILE);
    rotolog::error!(logger: &logger, "request %s failed: %v", "GET /health", 503);
    rotolog::errorln!(logger: &logger, "retrying in ", 5, "s");

    Ok(())
}
