use thiserror::Error;

/// Errors the invoker can surface to its caller.
///
/// A worker that runs to completion is never an error, whatever its exit
/// code: the outcome carries the code and the caller decides. Only the
/// cases where there is nothing to collect end up here.
#[derive(Error, Debug)]
pub enum InvokerError {
    #[error("failed to spawn worker '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to write parameter to worker stdin: {0}")]
    Stdin(std::io::Error),

    #[error("worker timed out after {0}s")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type InvokerResult<T> = Result<T, InvokerError>;
