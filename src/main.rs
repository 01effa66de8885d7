mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use scrape_runner::config::logging::{self, LogConfig};
use scrape_runner::core::config::InvokerConfig;
use scrape_runner::core::models::InvocationRequest;
use scrape_runner::services::invoker;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init("scrape-runner", &LogConfig::from_env());

    let cli = Cli::parse();

    info!("Starting scrape-runner");
    info!("Limit parameter: {}", cli.limit);

    let config = InvokerConfig::resolve(cli.program, cli.script, cli.timeout)?;
    let request = InvocationRequest::new(&cli.limit);

    let outcome = invoker::run(&config, &request).await?;

    if !outcome.is_success() {
        warn!(
            "Worker did not exit cleanly (status {:?}); printing collected output anyway",
            outcome.exit_code
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Result from worker: {}", outcome.output);
    }

    Ok(())
}
