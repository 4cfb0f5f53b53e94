use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

use crate::consts::ENDPOINT_PATH;

use super::{Evaluator, ExprRequest, FetchError, Reply};

/// Posts expressions to `<server>/api/expr`.
pub struct HttpEvaluator {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpEvaluator {
    /// Build an evaluator for the given server base URL. `timeout` is handed
    /// to the HTTP client as-is; `None` leaves the transport default.
    pub fn new(server: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint_url(server)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }
}

/// Error text including every `source()` cause, e.g. the refused connect.
fn describe(err: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

/// Parse a server base URL and join the fixed endpoint path onto it.
pub fn endpoint_url(server: &str) -> Result<Url> {
    let base = Url::parse(server.trim()).with_context(|| format!("invalid server URL: {server}"))?;
    if !matches!(base.scheme(), "http" | "https") {
        anyhow::bail!("unsupported scheme in server URL: {server}");
    }
    base.join(ENDPOINT_PATH)
        .with_context(|| format!("cannot build endpoint from {server}"))
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn evaluate(&self, expr: &str) -> Result<Reply, FetchError> {
        debug!(endpoint = %self.endpoint, len = expr.len(), "submitting expression");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&ExprRequest { expr })
            .send()
            .await
            .map_err(|e| {
                let message = describe(e);
                warn!(error = %message, "request failed");
                FetchError::Transport(message)
            })?;

        let status = resp.status();
        debug!(status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(describe(e)))?;

        Reply::parse(&body)
    }
}
