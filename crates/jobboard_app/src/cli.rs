use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "jobboard", about = "Live job listing that refreshes in the background")]
pub struct Cli {
    /// RON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8080
    #[arg(long)]
    pub base_url: Option<String>,

    /// Poll period in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Minimum gap between background refreshes in milliseconds.
    #[arg(long)]
    pub min_interval_ms: Option<u64>,

    #[arg(long)]
    pub page_size: Option<u32>,

    /// Log file path (defaults to ./jobboard.log).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}
