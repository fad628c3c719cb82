//! Route `tracing` events through the default logger.
//!
//! Run with:
//! ```bash
//! cargo run --example tracing_bridge -- -v
//! ```

use rotolog::{FileLogConfig, Level, LogConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let verbose = std::env::args().filter(|a| a == "-v").count() as u8;

    let config = LogConfig::new()
        .with_level(Level::Info)
        .with_file(FileLogConfig::new("logs/bridge.log").with_max_size(1024 * 1024));
    rotolog::init_tracing(&config, Some(verbose))?;

    tracing::debug!("only visible with -v");
    tracing::info!(user = "alice", "user logged in");
    rotolog::info!("records from both APIs share one file and one size counter");

    Ok(())
}
