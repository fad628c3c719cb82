//! Size-based rotation example.
//!
//! Writes enough records to roll the log file several times.
//!
//! Run with:
//! ```bash
//! cargo run --example rotation
//! ```

use rotolog::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    rotolog::builder()
        .with_level(Level::Debug)
        .with_file("logs/rotation.log")
        .with_max_size(4 * 1024)
        .with_file_prefix("rotation")
        .init()?;

    for i in 0..500 {
        rotolog::info!("processed batch %d of %d", i, 500);
    }

    let logger = rotolog::logger();
    logger.flush()?;
    println!(
        "rotated {} times, active file {:?} holds {} bytes",
        logger.rotations(),
        logger.path(),
        logger.current_size()
    );

    Ok(())
}
