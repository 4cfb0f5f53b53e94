pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Request body sent to the evaluation endpoint.
#[derive(Debug, Serialize)]
pub struct ExprRequest<'a> {
    pub expr: &'a str,
}

/// A parsed response body from the evaluation server.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The expression evaluated successfully.
    Result(String),
    /// The server reported an evaluation failure.
    Error(String),
    /// Neither `error` nor `result` was set. Carries the body as compact JSON.
    Unknown(String),
}

/// A submission that never produced a usable body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// Network failure, or a body that was not valid JSON.
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("status {0}")]
    Status(u16),
}

impl Reply {
    /// Classify a response body. `error` wins over `result`; both only
    /// count when truthy.
    pub fn parse(body: &str) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let value = &integral_floats(value.clone());
        let field = |name: &str| value.get(name).filter(|v| is_truthy(v));

        if let Some(error) = field("error") {
            return Reply::Error(text_of(error));
        }
        if let Some(result) = field("result") {
            return Reply::Result(text_of(result));
        }
        Reply::Unknown(value.to_string())
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Result(result) => write!(f, "Result: {result}"),
            Reply::Error(error) => write!(f, "Error: {error}"),
            Reply::Unknown(raw) => write!(f, "Unknown response: {raw}"),
        }
    }
}

/// The text the widget shows for a finished submission.
pub fn render(outcome: &Result<Reply, FetchError>) -> String {
    match outcome {
        Ok(reply) => reply.to_string(),
        Err(FetchError::Status(code)) => format!("Server error: {code}"),
        Err(FetchError::Transport(message)) => format!("Fetch error: {message}"),
    }
}

/// JavaScript truthiness for JSON values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Largest integer an f64 holds exactly (JavaScript's `Number.MAX_SAFE_INTEGER + 1`).
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Fold integral floats into integers, so `1e2` and `1.0` print as `100`
/// and `1` the way JavaScript shows them.
fn integral_floats(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < EXACT_INTEGER_LIMIT => Value::from(f as i64),
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(integral_floats).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| (key, integral_floats(v)))
                .collect(),
        ),
        other => other,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The remote side of the widget. Could be an HTTP server or a test script.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, expr: &str) -> Result<Reply, FetchError>;
}
