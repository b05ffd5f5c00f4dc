use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ctxdo", about = concat!("ctxdo v", env!("CARGO_PKG_VERSION"), " - tasks grouped by context"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Task document to open (default: <cache dir>/ctxdo/tasks.json)
    pub file: Option<PathBuf>,

    /// Read configuration from this file instead of <config dir>/ctxdo/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print task statistics without starting the interface
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct StatsArgs {
    /// Task document to read
    pub file: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
