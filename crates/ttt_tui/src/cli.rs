//! Command-line interface for the terminal client.

use clap::Parser;
use std::path::PathBuf;

/// Play tic-tac-toe against a remote game service.
#[derive(Parser, Debug)]
#[command(name = "ttt")]
#[command(about = "Terminal client for a remote tic-tac-toe engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client config file (defaults apply if it does not exist)
    #[arg(short, long, default_value = "ttt.toml")]
    pub config: PathBuf,

    /// Game service URL, overrides config and environment
    #[arg(long)]
    pub server_url: Option<String>,

    /// Polling period in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// File receiving log output while the terminal UI is active
    #[arg(long, default_value = "ttt.log")]
    pub log_file: PathBuf,
}
