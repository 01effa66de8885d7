use crate::core::config::InvokerConfig;
use crate::core::models::{InvocationOutcome, InvocationRequest};
use crate::services::invoker::invoker::{TokioWorkerInvoker, WorkerInvoker};
use anyhow::Result;
use tracing::{info, warn};

/// One complete launch-write-collect-terminate cycle with the worker.
pub async fn run(config: &InvokerConfig, request: &InvocationRequest) -> Result<InvocationOutcome> {
    info!(
        "Invoking worker: {} {}",
        config.program,
        config.script.display()
    );

    let invoker = TokioWorkerInvoker;
    let outcome = invoker.invoke(config, request).await?;

    match outcome.exit_code {
        Some(0) => info!(
            "Worker finished with {} bytes of output",
            outcome.output.len()
        ),
        code => warn!(
            "Worker exited with status {:?}; keeping {} bytes of collected output",
            code,
            outcome.output.len()
        ),
    }

    Ok(outcome)
}
