use crate::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pv")]
#[command(about = "Inspect and maintain per-user profile records")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store root (overrides store.root from config.toml)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Resolve field names leniently (prefix stripping, substring match)
    #[arg(long, global = true)]
    pub lenient: bool,
}
