use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrape-runner")]
#[command(about = "Runs the news scraping worker and prints its output", long_about = None)]
pub struct Cli {
    /// Limit parameter streamed to the worker, verbatim
    #[arg(short, long, default_value = "1")]
    pub limit: String,

    /// Interpreter used to launch the worker
    #[arg(long, value_name = "PROGRAM")]
    pub program: Option<String>,

    /// Path to the worker script
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Kill the worker if it has not exited after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the full outcome (exit code, output, diagnostics) as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,
}
