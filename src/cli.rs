//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

/// Interactive void-relic price checker backed by warframe.market.
#[derive(Parser, Debug)]
#[command(name = "relicworth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the relic catalog path from the config
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Override the cache directory from the config
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}
