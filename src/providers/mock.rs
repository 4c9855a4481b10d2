/*!
 * Mock provider implementation for testing.
 *
 * This module provides a scripted backend that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a tagged copy of the text
 * - `MockProvider::failing()` - Always fails with an API error
 * - `MockProvider::failing_on(..)` - Fails on the listed call indices only
 * - `MockProvider::intermittent(n)` - Fails on every n-th call
 *
 * Every call is recorded, and the number of calls in flight at the same time
 * is tracked so tests can verify the one-call-at-a-time discipline.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub api_key: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails on the given zero-based call indices
    FailOn(HashSet<usize>),
    /// Fails on every n-th call
    Intermittent { fail_every: usize },
    /// Always fails
    Failing,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    delay: Option<Duration>,
    custom_response: Option<fn(&MockCall) -> String>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            custom_response: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn failing_on(calls: impl IntoIterator<Item = usize>) -> Self {
        Self::new(MockBehavior::FailOn(calls.into_iter().collect()))
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    /// Sleep this long inside every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockCall) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// The text a working call returns for `call`
    pub fn default_response(call: &MockCall) -> String {
        format!("[{}] {}", call.target_language, call.text)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Snapshot of all calls so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Highest number of calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn should_fail(&self, index: usize) -> bool {
        match &self.behavior {
            MockBehavior::Working => false,
            MockBehavior::Failing => true,
            MockBehavior::FailOn(indices) => indices.contains(&index),
            MockBehavior::Intermittent { fail_every } => index % fail_every == fail_every - 1,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        api_key: &str,
    ) -> Result<String, ProviderError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let call = MockCall {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            api_key: api_key.to_string(),
        };
        let index = {
            let mut calls = self.calls.lock();
            calls.push(call.clone());
            calls.len() - 1
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = if self.should_fail(index) {
            Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated failure on call {}", index),
            })
        } else {
            let generator = self.custom_response.unwrap_or(Self::default_response);
            Ok(generator(&call))
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
