// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use scenesage::app_config::{Config, LogLevel, ProviderKind};
use scenesage::app_controller::Controller;
use scenesage::file_utils::FileManager;

/// CLI Wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    #[value(name = "openrouter")]
    OpenRouter,
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
}

impl From<CliProvider> for ProviderKind {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::OpenRouter => ProviderKind::OpenRouter,
            CliProvider::OpenAI => ProviderKind::OpenAI,
            CliProvider::Anthropic => ProviderKind::Anthropic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for scenesage
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// SceneSage - split subtitles into scenes and describe them with an LLM
#[derive(Parser, Debug)]
#[command(name = "scenesage")]
#[command(version)]
#[command(about = "Split SRT into scenes and analyze with LLM.")]
#[command(long_about = "SceneSage splits a subtitle file into scenes at long pauses and asks a language model \
for a summary, characters, mood and cultural references of every scene.

EXAMPLES:
    scenesage movie.srt                                  # Analyze with defaults (OpenRouter)
    scenesage movie.srt --model openai/gpt-4o-mini       # Use a specific model
    scenesage movie.srt --output plan9.json              # Choose the output file
    scenesage movie.srt --pause-threshold 6              # Fewer, longer scenes
    scenesage completions bash > scenesage.bash          # Generate bash completions

CREDENTIALS:
    The API key is read from OPENROUTER_API_KEY (or the variable named by
    provider.api_key_env in the config file). A .env file in the working
    directory is loaded first.")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file (.srt)
    #[arg(value_name = "FILENAME")]
    filename: Option<PathBuf>,

    /// Model name for the provider API
    #[arg(short, long)]
    model: Option<String>,

    /// Filename for output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProvider>,

    /// Minimum pause in seconds that starts a new scene
    #[arg(long)]
    pause_threshold: Option<f64>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Prefix and ANSI color for level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (prefix, color) = Self::decoration(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {}{}\x1B[0m", color, now, prefix, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "scenesage", &mut std::io::stdout());
        return;
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(options: CommandLineOptions) -> Result<()> {
    let Some(filename) = options.filename.clone() else {
        CommandLineOptions::command().print_help()?;
        return Err(anyhow::anyhow!("FILENAME is required"));
    };

    // Apply a command line log level right away
    if let Some(level) = &options.log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    // Credentials may live in a .env file
    dotenv::dotenv().ok();

    let config = load_config(&options)?;
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Missing credentials abort here, before the subtitle file is read
    let controller = Controller::from_environment(config)
        .context("Failed to initialize")?;

    let output_file = FileManager::resolve_output_path(&controller.config().output_file);
    controller.run(&filename, &output_file).await?;

    Ok(())
}

fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.provider.switch_kind(provider.clone().into());
    }

    if let Some(model) = &options.model {
        config.provider.model = model.clone();
    }

    if let Some(output) = &options.output {
        config.output_file = output.to_string_lossy().to_string();
    }

    if let Some(threshold) = options.pause_threshold {
        config.segmentation.pause_threshold_secs = threshold;
    }

    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
