/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::fixed(..)` - Always answers with the same text
 * - `MockProvider::sequence(..)` - Answers with scripted texts in call order
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always returns this text
    Fixed(String),
    /// Returns the Nth text on the Nth call, repeating the last one afterwards
    Sequence(Vec<String>),
    /// Always fails with an error
    Failing,
    /// Simulates a slow response before answering with the text
    Slow { delay_ms: u64, text: String },
}

/// Mock provider for testing analysis behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Prompts received, in call order
    prompts: Arc<Mutex<Vec<String>>>,
    /// Custom response generator (optional), takes the prompt
    custom_response: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a mock that always answers with `text`
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(text.into()))
    }

    /// Create a mock answering with scripted texts in call order
    pub fn sequence<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(MockBehavior::Sequence(texts.into_iter().map(Into::into).collect()))
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that waits before answering
    pub fn slow(delay_ms: u64, text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Slow { delay_ms, text: text.into() })
    }

    /// Set a custom response generator; it overrides scripted texts
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn scripted(&self, prompt: &str, text: &str) -> String {
        match self.custom_response {
            Some(generator) => generator(prompt),
            None => text.to_string(),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            prompts: Arc::clone(&self.prompts),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str, _model: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.behavior {
            MockBehavior::Fixed(text) => Ok(self.scripted(prompt, text)),

            MockBehavior::Sequence(texts) => {
                let text = texts.get(count).or_else(|| texts.last())
                    .ok_or(ProviderError::EmptyResponse)?;
                Ok(self.scripted(prompt, text))
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Slow { delay_ms, text } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(self.scripted(prompt, text))
            }
        }
    }
}
