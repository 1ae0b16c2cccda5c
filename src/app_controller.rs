use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::analysis::SceneAnalyzer;
use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::providers::{self, Provider};
use crate::scenes::{AnalyzedScene, Scene, SceneSegmenter};
use crate::subtitle_processor::SrtParser;

// @module: Application controller for scene analysis

/// Main application controller: parse, segment, analyze, write
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Model provider used for every scene
    provider: Arc<dyn Provider>,
}

impl Controller {
    /// Create a controller whose provider key comes from the environment.
    ///
    /// Fails before any file is touched when the key is missing.
    pub fn from_environment(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let api_key = config.provider.resolve_api_key()?;
        let provider = providers::from_config(&config.provider, api_key);
        Ok(Self { config, provider })
    }

    // @method: Create a controller with an explicit provider
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config, provider })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a subtitle file and split it into scenes
    pub fn segment_file(&self, input_file: &Path) -> Result<Vec<Scene>> {
        let cues = SrtParser::parse_file(input_file)
            .with_context(|| format!("Failed to parse subtitle file: {}", input_file.display()))?;
        let segmenter = SceneSegmenter::new(self.config.segmentation.pause_threshold_secs)?;
        Ok(segmenter.segment(&cues))
    }

    /// Analyze scenes with a progress bar
    pub async fn analyze_scenes(&self, scenes: Vec<Scene>) -> Result<Vec<AnalyzedScene>> {
        let model = self.config.provider.get_model();
        info!("Analyzing with {} - {}", self.config.provider.kind.display_name(), model);

        let analyzer = SceneAnalyzer::from_config(Arc::clone(&self.provider), model, &self.config.analysis);

        let progress_bar = ProgressBar::new(scenes.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} scenes ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let pb = progress_bar.clone();
        let result = analyzer
            .analyze_scenes(scenes, move |index, total, scene| {
                pb.suspend(|| {
                    info!("Analyzing Scene {}/{} ({})...", index + 1, total, scene.time_range());
                });
                pb.set_position(index as u64);
                pb.set_message(scene.time_range());
            })
            .await;

        progress_bar.finish_and_clear();
        Ok(result?)
    }

    /// Run the full workflow on one subtitle file, writing JSON to `output_file`
    pub async fn run(&self, input_file: &Path, output_file: &Path) -> Result<PathBuf> {
        let start_time = Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        info!("Splitting into scenes...");
        let scenes = self.segment_file(input_file)?;
        info!("Found {} scenes.", scenes.len());
        if scenes.is_empty() {
            warn!("No scenes found in {:?}", input_file);
        }
        for scene in &scenes {
            debug!("Scene {} ({} cues, {} ms)", scene.time_range(), scene.cue_count, scene.duration_ms());
        }

        let analyzed = self.analyze_scenes(scenes).await?;

        let empty = analyzed.iter().filter(|a| !a.has_insights()).count();
        if empty > 0 {
            warn!("{} of {} scenes have no extracted metadata", empty, analyzed.len());
        }

        FileManager::write_json(output_file, &analyzed)?;
        info!("Output saved to {} file", output_file.display());
        info!("Completed in {}.", Self::format_duration(start_time.elapsed()));

        Ok(output_file.to_path_buf())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
