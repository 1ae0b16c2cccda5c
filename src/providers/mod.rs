/*!
 * Provider implementations for model invocation.
 *
 * This module contains client implementations for the supported LLM providers:
 * - OpenAI-compatible chat completions (OpenRouter, OpenAI)
 * - Anthropic: Anthropic messages API
 * - Mock: scripted responses for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// Given a prompt and a model identifier, a provider returns one text
/// completion. Transport and API failures surface as `ProviderError`;
/// no provider retries on its own.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name for log lines
    fn name(&self) -> &str;

    /// Complete a single-turn prompt
    ///
    /// # Arguments
    /// * `prompt` - The full user prompt
    /// * `model` - Model identifier understood by the provider
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw completion text or an error
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, ProviderError>;
}

/// Build the configured provider client with the resolved API key
pub fn from_config(config: &ProviderConfig, api_key: String) -> Arc<dyn Provider> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match config.kind {
        ProviderKind::OpenRouter | ProviderKind::OpenAI => Arc::new(
            openai::OpenAI::new(api_key, config.get_endpoint(), timeout)
                .with_max_tokens(config.max_tokens)
                .with_temperature(config.temperature),
        ),
        ProviderKind::Anthropic => Arc::new(
            anthropic::Anthropic::new(api_key, config.get_endpoint(), timeout)
                .with_max_tokens(config.max_tokens)
                .with_temperature(config.temperature),
        ),
    }
}

pub mod openai;
pub mod anthropic;
pub mod mock;
