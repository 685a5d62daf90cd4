//! Print the effective configuration.

use anyhow::Result;
use std::path::Path;

use crate::config::{default_config_path, Config};

/// Run the config command.
pub fn run(config: &Config, source: Option<&Path>) -> Result<()> {
    match source.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) if path.exists() => println!("# loaded from {}", path.display()),
        Some(path) => println!("# defaults ({} not found)", path.display()),
        None => println!("# defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
