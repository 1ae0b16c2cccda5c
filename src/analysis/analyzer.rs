/*!
 * Per-scene model analysis.
 *
 * Each scene transcript is sent once to the provider with the structured
 * extraction prompt. Decode problems are absorbed into an empty record;
 * provider failures are returned to the caller untouched (no retries).
 */

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use log::debug;

use crate::analysis::extraction::PayloadExtractor;
use crate::analysis::prompts::PromptTemplate;
use crate::app_config::AnalysisConfig;
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::scenes::{AnalyzedScene, Scene, SceneInsights};

/// Analyze one transcript with the default prompt and extraction chain.
pub async fn analyze(
    transcript: &str,
    provider: &dyn Provider,
    model: &str,
) -> Result<SceneInsights, ProviderError> {
    let prompt = PromptTemplate::default().render(transcript);
    let raw = provider.complete(&prompt, model).await?;
    debug!("Raw {} response: {}", provider.name(), raw);
    Ok(PayloadExtractor::default().parse_insights(&raw))
}

/// Sends scenes to a provider and collects their insights in scene order.
pub struct SceneAnalyzer {
    provider: Arc<dyn Provider>,
    model: String,
    prompt: PromptTemplate,
    extractor: PayloadExtractor,
    /// Sleep after every model invocation
    pacing_delay: Duration,
    /// Scenes in flight at once
    concurrent_requests: usize,
}

impl SceneAnalyzer {
    /// Sequential analyzer with the default 1.5 s pacing delay.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self::from_config(provider, model, &AnalysisConfig::default())
    }

    /// Analyzer honoring the pacing and concurrency settings.
    pub fn from_config(provider: Arc<dyn Provider>, model: impl Into<String>, config: &AnalysisConfig) -> Self {
        Self {
            provider,
            model: model.into(),
            prompt: PromptTemplate::default(),
            extractor: PayloadExtractor::default(),
            pacing_delay: Duration::from_millis(config.pacing_delay_ms),
            concurrent_requests: config.concurrent_requests.max(1),
        }
    }

    /// Replace the prompt template.
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Override the pacing delay.
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model about one transcript.
    pub async fn analyze(&self, transcript: &str) -> Result<SceneInsights, ProviderError> {
        let prompt = self.prompt.render(transcript);
        let raw = self.provider.complete(&prompt, &self.model).await?;
        debug!("Raw {} response: {}", self.provider.name(), raw);
        Ok(self.extractor.parse_insights(&raw))
    }

    /// Analyze every scene, keeping input order.
    ///
    /// `on_start(index, total, scene)` fires right before a scene is sent.
    /// The first provider failure aborts the batch.
    pub async fn analyze_scenes<F>(&self, scenes: Vec<Scene>, on_start: F) -> Result<Vec<AnalyzedScene>, ProviderError>
    where
        F: Fn(usize, usize, &Scene) + Sync,
    {
        let total = scenes.len();
        let on_start = &on_start;

        stream::iter(scenes.into_iter().enumerate())
            .map(|(index, scene)| async move {
                on_start(index, total, &scene);
                let insights = self.analyze(&scene.transcript).await?;
                self.pace().await;
                Ok::<_, ProviderError>(AnalyzedScene::new(scene, insights))
            })
            .buffered(self.concurrent_requests)
            .try_collect()
            .await
    }

    async fn pace(&self) {
        if !self.pacing_delay.is_zero() {
            tokio::time::sleep(self.pacing_delay).await;
        }
    }
}
