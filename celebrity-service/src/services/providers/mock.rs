//! Mock provider implementation for testing.

use super::{Part, ProviderError, VisionProvider};
use async_trait::async_trait;
use std::sync::Mutex;

enum Outcome {
    Reply(String),
    Fail(String),
}

/// Mock vision provider that answers with a canned reply or failure and
/// remembers every request it was given.
pub struct MockVisionProvider {
    outcome: Outcome,
    calls: Mutex<Vec<Vec<Part>>>,
}

impl MockVisionProvider {
    /// Succeed with `text` on every call.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Reply(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail with `message` on every call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Parts received so far, one entry per `generate` call.
    pub fn calls(&self) -> Vec<Vec<Part>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    async fn generate(&self, parts: &[Part]) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(parts.to_vec());

        match &self.outcome {
            Outcome::Reply(text) => Ok(text.clone()),
            Outcome::Fail(message) => Err(ProviderError::Other(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.outcome {
            Outcome::Reply(_) => Ok(()),
            Outcome::Fail(message) => Err(ProviderError::Other(message.clone())),
        }
    }
}
