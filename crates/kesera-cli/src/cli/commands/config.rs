//! `kesera config` – show config path and effective settings.

use anyhow::Result;
use kesera_core::config::{self, KeseraConfig};

pub fn run_config(cfg: &KeseraConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
