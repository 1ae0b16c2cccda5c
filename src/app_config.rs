use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::AppError;
use crate::scenes::{SceneSegmenter, DEFAULT_PAUSE_THRESHOLD_SECS};

/// Application configuration module
/// This module handles loading, defaulting and validating settings.
/// Every field has a default, so a partial (or absent) file is fine.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Model provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Scene segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Scene analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Output JSON file
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Model provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: OpenRouter (OpenAI-compatible)
    #[default]
    OpenRouter,
    // @provider: OpenAI
    OpenAI,
    // @provider: Anthropic
    Anthropic,
}

impl ProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenRouter => "OpenRouter",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenRouter => "openrouter".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }

    pub fn default_endpoint(&self) -> String {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1".to_string(),
            Self::OpenAI => "https://api.openai.com/v1".to_string(),
            Self::Anthropic => "https://api.anthropic.com".to_string(),
        }
    }

    pub fn default_model(&self) -> String {
        match self {
            Self::OpenRouter => "meta-llama/llama-3.3-8b-instruct:free".to_string(),
            Self::OpenAI => "gpt-4o-mini".to_string(),
            Self::Anthropic => "claude-3-haiku-20240307".to_string(),
        }
    }

    pub fn default_api_key_env(&self) -> String {
        match self {
            Self::OpenRouter => "OPENROUTER_API_KEY".to_string(),
            Self::OpenAI => "OPENAI_API_KEY".to_string(),
            Self::Anthropic => "ANTHROPIC_API_KEY".to_string(),
        }
    }
}

// Implement Display trait for ProviderKind
impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for ProviderKind
impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openrouter" => Ok(Self::OpenRouter),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow::anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration
///
/// Empty `model`, `endpoint` and `api_key_env` fall back to the provider
/// type's defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub kind: ProviderKind,

    // @field: Model name
    #[serde(default)]
    pub model: String,

    // @field: Service URL
    #[serde(default)]
    pub endpoint: String,

    // @field: Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Completion length cap, omitted from OpenAI-compatible requests when unset
    #[serde(default)]
    pub max_tokens: Option<u32>,

    // @field: Sampling temperature, provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl ProviderConfig {
    // @param kind: Provider enum
    // @returns: Provider config with defaults
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            model: kind.default_model(),
            endpoint: kind.default_endpoint(),
            api_key_env: kind.default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Switch provider type, resetting type-specific values to that type's defaults
    pub fn switch_kind(&mut self, kind: ProviderKind) {
        if self.kind != kind {
            self.kind = kind;
            self.model = kind.default_model();
            self.endpoint = kind.default_endpoint();
            self.api_key_env = kind.default_api_key_env();
        }
    }

    /// Get the model for the provider
    pub fn get_model(&self) -> String {
        if self.model.is_empty() { self.kind.default_model() } else { self.model.clone() }
    }

    /// Get the endpoint for the provider
    pub fn get_endpoint(&self) -> String {
        if self.endpoint.is_empty() { self.kind.default_endpoint() } else { self.endpoint.clone() }
    }

    /// Get the name of the API key variable
    pub fn get_api_key_env(&self) -> String {
        if self.api_key_env.is_empty() { self.kind.default_api_key_env() } else { self.api_key_env.clone() }
    }

    /// Copy with every fallback applied
    pub fn resolved(&self) -> Self {
        Self {
            model: self.get_model(),
            endpoint: self.get_endpoint(),
            api_key_env: self.get_api_key_env(),
            ..self.clone()
        }
    }

    /// Read the API key from the process environment
    pub fn resolve_api_key(&self) -> Result<String, AppError> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    /// Read the API key through a lookup function; empty values count as missing
    pub fn api_key_from<F>(&self, lookup: F) -> Result<String, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = self.get_api_key_env();
        match lookup(&name) {
            Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(AppError::MissingCredential(name)),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(ProviderKind::default())
    }
}

/// Scene segmentation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SegmentationConfig {
    /// Minimum gap between cues, in seconds, that starts a new scene
    #[serde(default = "default_pause_threshold_secs")]
    pub pause_threshold_secs: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            pause_threshold_secs: default_pause_threshold_secs(),
        }
    }
}

/// Scene analysis configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Delay in milliseconds after every model invocation
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,

    /// Scenes analyzed at once; 1 keeps the strictly sequential behavior
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pacing_delay_ms: default_pacing_delay_ms(),
            concurrent_requests: default_concurrent_requests(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_pause_threshold_secs() -> f64 {
    DEFAULT_PAUSE_THRESHOLD_SECS
}

fn default_pacing_delay_ms() -> u64 {
    1500 // fixed delay between requests to stay under provider rate limits
}

fn default_concurrent_requests() -> usize {
    1
}

fn default_output_file() -> String {
    "scenes.json".to_string()
}

impl Config {
    /// Load configuration from a JSON file, or defaults when the file is absent
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        SceneSegmenter::new(self.segmentation.pause_threshold_secs)?;

        if self.analysis.concurrent_requests == 0 {
            return Err(AppError::Config("analysis.concurrent_requests must be at least 1".to_string()));
        }

        if self.provider.get_model().trim().is_empty() {
            return Err(AppError::Config("provider.model must not be empty".to_string()));
        }

        if self.provider.timeout_secs == 0 {
            return Err(AppError::Config("provider.timeout_secs must be at least 1".to_string()));
        }

        let endpoint = self.provider.get_endpoint();
        Url::parse(&endpoint)
            .map_err(|e| AppError::Config(format!("Invalid provider endpoint '{}': {}", endpoint, e)))?;

        if self.output_file.trim().is_empty() {
            return Err(AppError::Config("output_file must not be empty".to_string()));
        }

        Ok(())
    }
}
