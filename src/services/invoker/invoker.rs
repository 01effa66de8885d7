use crate::core::config::InvokerConfig;
use crate::core::error::{InvokerError, InvokerResult};
use crate::core::models::{InvocationOutcome, InvocationRequest};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

#[async_trait]
pub trait WorkerInvoker: Send + Sync {
    async fn invoke(
        &self,
        config: &InvokerConfig,
        request: &InvocationRequest,
    ) -> InvokerResult<InvocationOutcome>;
}

/// Runs the worker as a tokio child process: writes the parameter to its
/// stdin, closes the stream, and collects stdout until the worker exits.
pub struct TokioWorkerInvoker;

#[async_trait]
impl WorkerInvoker for TokioWorkerInvoker {
    async fn invoke(
        &self,
        config: &InvokerConfig,
        request: &InvocationRequest,
    ) -> InvokerResult<InvocationOutcome> {
        let mut cmd = Command::new(&config.program);
        cmd.arg(&config.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| InvokerError::Spawn {
            program: config.program.clone(),
            source: e,
        })?;

        match config.timeout {
            Some(timeout) => {
                match tokio::time::timeout(timeout, collect(child, request)).await {
                    Ok(outcome) => outcome,
                    // Dropping the collect future drops the child, which
                    // kills the worker (kill_on_drop).
                    Err(_) => Err(InvokerError::Timeout(timeout.as_secs())),
                }
            }
            None => collect(child, request).await,
        }
    }
}

/// Streamed I/O for one invocation. The outcome is produced only after
/// the worker's exit notification, never before.
async fn collect(
    mut child: Child,
    request: &InvocationRequest,
) -> InvokerResult<InvocationOutcome> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| anyhow::anyhow!("worker stdin was not captured"))?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("worker stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!("worker stderr was not captured"))?;

    // Drain stderr concurrently so a chatty worker can never wedge on a
    // full pipe. Every line is logged live and kept for the outcome.
    let stderr_task = tokio::spawn(async move {
        let mut diagnostics = Vec::new();
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            warn!("worker stderr: {}", line);
            diagnostics.push(line);
        }
        diagnostics
    });

    // The payload is the entire input: no delimiter, no framing. Closing
    // the stream is the end-of-input signal.
    if let Err(e) = stdin.write_all(request.payload().as_bytes()).await {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            debug!("worker exited before reading its parameter");
        } else {
            return Err(InvokerError::Stdin(e));
        }
    }
    drop(stdin);

    // read_to_end appends chunks in arrival order and returns once the
    // worker closes its end of the pipe.
    let mut raw = Vec::new();
    stdout.read_to_end(&mut raw).await?;

    let status = child.wait().await?;
    let diagnostics = stderr_task.await.unwrap_or_default();

    Ok(InvocationOutcome {
        exit_code: status.code(),
        output: String::from_utf8_lossy(&raw).trim().to_string(),
        diagnostics,
    })
}
