use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::{Evaluator, FetchError, Reply};

/// One scripted answer. A gated step waits until its [`Notify`] fires.
pub struct MockStep {
    outcome: Result<Reply, FetchError>,
    gate: Option<Arc<Notify>>,
}

impl MockStep {
    pub fn ready(outcome: Result<Reply, FetchError>) -> Self {
        Self {
            outcome,
            gate: None,
        }
    }

    /// A step that blocks until the returned handle is notified.
    pub fn gated(outcome: Result<Reply, FetchError>) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let step = Self {
            outcome,
            gate: Some(Arc::clone(&gate)),
        };
        (step, gate)
    }
}

/// A scripted evaluator for tests. Returns pre-defined outcomes in call order.
pub struct MockEvaluator {
    steps: Vec<MockStep>,
    index: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockEvaluator {
    pub fn new(steps: Vec<MockStep>) -> Self {
        Self {
            steps,
            index: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Expressions received so far, in call order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Evaluator for MockEvaluator {
    async fn evaluate(&self, expr: &str) -> Result<Reply, FetchError> {
        self.seen.lock().unwrap().push(expr.to_string());

        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.get(i).ok_or_else(|| {
            FetchError::Transport(format!(
                "MockEvaluator: no more steps (called {} times)",
                i + 1
            ))
        })?;

        if let Some(gate) = &step.gate {
            gate.notified().await;
        }
        step.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_steps_in_order() {
        let mock = MockEvaluator::new(vec![
            MockStep::ready(Ok(Reply::Result("1".into()))),
            MockStep::ready(Err(FetchError::Status(502))),
        ]);
        assert_eq!(mock.evaluate("a").await, Ok(Reply::Result("1".into())));
        assert_eq!(mock.evaluate("b").await, Err(FetchError::Status(502)));
        assert_eq!(mock.seen(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn exhausted_script_is_transport_error() {
        let mock = MockEvaluator::new(vec![]);
        let err = mock.evaluate("x").await.unwrap_err();
        assert!(err.to_string().contains("no more steps"));
    }

    #[tokio::test]
    async fn gated_step_waits_for_release() {
        let (step, gate) = MockStep::gated(Ok(Reply::Result("late".into())));
        let mock = Arc::new(MockEvaluator::new(vec![step]));

        let task = {
            let mock = Arc::clone(&mock);
            tokio::spawn(async move { mock.evaluate("x").await })
        };
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        gate.notify_one();
        assert_eq!(task.await.unwrap(), Ok(Reply::Result("late".into())));
    }
}
