use scrape_runner::core::config::InvokerConfig;
use scrape_runner::core::error::InvokerError;
use scrape_runner::core::models::InvocationRequest;
use scrape_runner::services::invoker::{self, TokioWorkerInvoker, WorkerInvoker};
use std::fs;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Materialize a shell script to play the worker. The TempDir must stay
/// alive for the duration of the invocation.
fn stub_worker(body: &str) -> (TempDir, InvokerConfig) {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("worker.sh");
    fs::write(&script, body).unwrap();
    let config = InvokerConfig::new("sh", script);
    (dir, config)
}

#[tokio::test]
async fn test_end_to_end_echo_with_limit_one() {
    // A worker that echoes its input back must resolve with exactly that
    // text when invoked with parameter 1.
    let (_dir, config) = stub_worker("cat\n");
    let request = InvocationRequest::new(1);

    let outcome = invoker::run(&config, &request).await.unwrap();

    assert_eq!(outcome.output, "1");
    assert!(outcome.is_success());
    assert!(outcome.diagnostics.is_empty());
}

#[tokio::test]
async fn test_parameter_delivered_without_framing() {
    // wc -c sees the complete stdin payload; five bytes in means no
    // delimiter was appended before the stream closed.
    let (_dir, config) = stub_worker("wc -c\n");
    let request = InvocationRequest::new("12345");

    let outcome = invoker::run(&config, &request).await.unwrap();

    assert_eq!(outcome.output, "5");
}

#[tokio::test]
async fn test_chunks_concatenate_in_arrival_order() {
    let (_dir, config) = stub_worker("printf A\nsleep 0.2\nprintf B\nsleep 0.2\nprintf C\n");
    let request = InvocationRequest::new(1);

    let outcome = invoker::run(&config, &request).await.unwrap();

    assert_eq!(outcome.output, "ABC");
}

#[tokio::test]
async fn test_surrounding_whitespace_is_stripped() {
    let (_dir, config) = stub_worker("printf '  hello world\\n'\n");
    let request = InvocationRequest::new(1);

    let outcome = invoker::run(&config, &request).await.unwrap();

    assert_eq!(outcome.output, "hello world");
}

#[tokio::test]
async fn test_interior_whitespace_is_preserved() {
    // Only surrounding whitespace goes; the text itself stays opaque.
    let (_dir, config) = stub_worker("printf 'line one\\nline two\\n'\n");
    let request = InvocationRequest::new(1);

    let outcome = invoker::run(&config, &request).await.unwrap();

    assert_eq!(outcome.output, "line one\nline two");
}

#[tokio::test]
async fn test_resolves_only_after_worker_exit() {
    let (_dir, config) = stub_worker("printf early\nsleep 1\nexit 0\n");
    let request = InvocationRequest::new(1);
    let started = Instant::now();

    let outcome = invoker::run(&config, &request).await.unwrap();

    // The exit notification fired before we got the outcome.
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(outcome.output, "early");
}

#[tokio::test]
async fn test_partial_output_survives_nonzero_exit() {
    let (_dir, config) = stub_worker("printf partial\nexit 3\n");
    let request = InvocationRequest::new(1);

    let outcome = invoker::run(&config, &request).await.unwrap();

    assert_eq!(outcome.output, "partial");
    assert_eq!(outcome.exit_code, Some(3));
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn test_silent_worker_yields_empty_string() {
    // Also exercises a worker that exits without reading its parameter;
    // the broken pipe on the write must not fail the invocation.
    let (_dir, config) = stub_worker("exit 0\n");
    let request = InvocationRequest::new(1);

    let outcome = invoker::run(&config, &request).await.unwrap();

    assert_eq!(outcome.output, "");
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_stderr_lines_become_diagnostics_in_order() {
    let (_dir, config) = stub_worker(
        "echo 'first diagnostic' >&2\necho 'second diagnostic' >&2\nprintf out\n",
    );
    let request = InvocationRequest::new(1);

    let outcome = invoker::run(&config, &request).await.unwrap();

    assert_eq!(outcome.output, "out");
    assert_eq!(
        outcome.diagnostics,
        vec!["first diagnostic".to_string(), "second diagnostic".to_string()]
    );
}

#[tokio::test]
async fn test_timeout_bounds_the_wait() {
    let (_dir, config) = stub_worker("sleep 5\n");
    let config = config.with_timeout(Duration::from_secs(1));
    let request = InvocationRequest::new(1);
    let started = Instant::now();

    let result = TokioWorkerInvoker.invoke(&config, &request).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    match result {
        Err(InvokerError::Timeout(secs)) => assert_eq!(secs, 1),
        other => panic!("Expected timeout error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_spawn_failure_is_a_hard_error() {
    let config = InvokerConfig::new("no-such-worker-program", "worker.sh");
    let request = InvocationRequest::new(1);

    let result = TokioWorkerInvoker.invoke(&config, &request).await;

    match result {
        Err(InvokerError::Spawn { program, .. }) => {
            assert_eq!(program, "no-such-worker-program");
        }
        other => panic!("Expected spawn error, got {:?}", other),
    }
}
