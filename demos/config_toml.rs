//! Example of loading logging configuration from a TOML file.
//!
//! Run with:
//! ```bash
//! cargo run --example config_toml
//! ```

use serde::Deserialize;
use std::fs;

#[derive(Deserialize)]
struct Config {
    log: rotolog::LogConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = "demos/config.toml";
    let config_content = fs::read_to_string(config_path)?;

    let root: Config = toml::from_str(&config_content)?;
    rotolog::init(&root.log)?;

    rotolog::debug!("loaded %s", config_path);
    rotolog::info!("max size is %d bytes", rotolog::logger().max_size());
    rotolog::warnln!("file target: ", format!("{:?}", rotolog::logger().path()));

    Ok(())
}
