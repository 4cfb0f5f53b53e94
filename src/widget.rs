//! The evaluator widget: input text in, one request out, outcome displayed.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::consts::RUNNING_PLACEHOLDER;
use crate::evaluator::{Evaluator, render};
use crate::output::Output;

/// Wires an [`Evaluator`] to an [`Output`].
///
/// Cheap to clone. Submissions are independent: nothing is deduplicated or
/// cancelled, and each one overwrites the output when its response lands,
/// so the last response to arrive wins.
#[derive(Clone)]
pub struct Widget {
    evaluator: Arc<dyn Evaluator>,
    output: Arc<dyn Output>,
}

impl Widget {
    pub fn new(evaluator: Arc<dyn Evaluator>, output: Arc<dyn Output>) -> Self {
        Self { evaluator, output }
    }

    /// Evaluate `input` and display the outcome, in the caller's task.
    pub async fn submit(&self, input: &str) {
        self.output.set_text(RUNNING_PLACEHOLDER);
        self.finish(input).await;
    }

    /// Show the placeholder now and evaluate `input` on a background task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&self, input: impl Into<String>) -> JoinHandle<()> {
        self.output.set_text(RUNNING_PLACEHOLDER);
        let widget = self.clone();
        let input = input.into();
        tokio::spawn(async move { widget.finish(&input).await })
    }

    async fn finish(&self, input: &str) {
        let outcome = self.evaluator.evaluate(input).await;
        debug!(ok = outcome.is_ok(), "submission finished");
        self.output.set_text(&render(&outcome));
    }
}
