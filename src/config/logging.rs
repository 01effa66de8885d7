use std::env;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Level,
    /// Log format (pretty, compact)
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        let level =
            Self::parse_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
        let format =
            Self::parse_format(&env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()));

        Self { level, format }
    }

    fn parse_level(s: &str) -> Level {
        match s.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            _ => {
                eprintln!("Invalid LOG_LEVEL: {}, using INFO", s);
                Level::INFO
            }
        }
    }

    fn parse_format(s: &str) -> LogFormat {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => {
                eprintln!("Invalid LOG_FORMAT: {}, using Pretty", s);
                LogFormat::Pretty
            }
        }
    }
}

struct PidTime;

impl tracing_subscriber::fmt::time::FormatTime for PidTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{} [{}]",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6fZ"),
            std::process::id()
        )
    }
}

/// Install the global subscriber: one layer on stderr, one daily-rolling
/// file under `logs/`. Stdout is left untouched; it carries the worker
/// result.
pub fn init(service_name: &str, config: &LogConfig) {
    let file_name = format!("{}.log", service_name);
    let file_appender = tracing_appender::rolling::daily("logs", file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Leak the guard so the writer survives for the life of the process
    std::mem::forget(guard);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.to_string()));

    let registry = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_timer(PidTime),
    );

    match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_timer(PidTime),
            )
            .init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_timer(PidTime),
            )
            .init(),
    }
}
