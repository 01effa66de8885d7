use serde::{Deserialize, Serialize};

/// The single parameter streamed to the worker.
///
/// Any stringifiable value is accepted; the payload is delivered to the
/// worker verbatim, with no delimiter or framing, and validated nowhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    payload: String,
}

impl InvocationRequest {
    pub fn new(value: impl ToString) -> Self {
        Self {
            payload: value.to_string(),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Everything one worker run produced.
///
/// `output` is the accumulated stdout with surrounding whitespace
/// stripped, available only once the worker has exited. `diagnostics`
/// holds the stderr lines in arrival order. `exit_code` is `None` when
/// the worker was killed by a signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvocationOutcome {
    pub exit_code: Option<i32>,
    pub output: String,
    pub diagnostics: Vec<String>,
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
