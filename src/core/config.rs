use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// How to reach the worker program.
///
/// Resolution order for every field: CLI flag, then environment
/// variable, then the built-in default. `timeout: None` means wait for
/// the worker indefinitely.
#[derive(Clone, Debug, PartialEq)]
pub struct InvokerConfig {
    pub program: String,
    pub script: PathBuf,
    pub timeout: Option<Duration>,
}

const DEFAULT_PROGRAM: &str = "python3";
const DEFAULT_SCRIPT: &str = "api/web_scraper.py";

impl InvokerConfig {
    /// Pure constructor for testing
    pub fn new(program: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Layer CLI overrides on top of environment variables and defaults.
    pub fn resolve(
        program: Option<String>,
        script: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        dotenv::dotenv().ok();

        let program = program
            .or_else(|| env::var("WORKER_PROGRAM").ok())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

        let script = script
            .or_else(|| env::var("WORKER_SCRIPT").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT));

        let timeout = match timeout_secs {
            Some(secs) => Some(secs),
            None => match env::var("WORKER_TIMEOUT_SECS") {
                Ok(raw) => Some(
                    raw.parse::<u64>()
                        .context("WORKER_TIMEOUT_SECS must be a number of seconds")?,
                ),
                Err(_) => None,
            },
        };

        Ok(Self {
            program,
            script,
            timeout: timeout.map(Duration::from_secs),
        })
    }
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_SCRIPT)
    }
}
