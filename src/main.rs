// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::app_controller::{Controller, NumberingMode};

mod app_config;
mod app_controller;
mod caption_processor;
mod errors;
mod file_utils;
mod timecode;
mod transcriber;
mod transcript_segmenter;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert SRT subtitles to WebVTT (file or directory)
    Convert {
        /// Input SRT file or directory to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output file path (defaults to the input name with a .vtt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Add or remove cue sequence numbers on a WebVTT file
    Number {
        /// Input VTT file to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove numbers instead of adding them
        #[arg(short, long)]
        remove: bool,

        /// Use the historical lookahead heuristic when removing numbers
        #[arg(long, requires = "remove")]
        compat: bool,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Transcribe an audio file and synthesize WebVTT captions
    Transcribe {
        /// Input audio file to upload
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output file path (defaults to the input name with a .vtt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Generate shell completions for subvtt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subvtt - SRT/WebVTT caption toolkit
///
/// Converts SubRip subtitles to WebVTT, toggles cue numbering on WebVTT
/// documents, and synthesizes captions from a transcription service.
#[derive(Parser, Debug)]
#[command(name = "subvtt")]
#[command(version = "1.0.0")]
#[command(about = "SRT to WebVTT conversion and caption synthesis")]
#[command(long_about = "subvtt converts SubRip subtitles to WebVTT, toggles cue sequence numbers \
and synthesizes WebVTT captions from audio via a transcription service.

EXAMPLES:
    subvtt convert movie.srt                  # Write movie.vtt next to the input
    subvtt convert /captions/ -f              # Convert a whole directory, overwriting
    subvtt number captions.vtt                # Add sequence numbers
    subvtt number -r captions.vtt             # Strip sequence numbers
    subvtt number -r --compat captions.vtt    # Strip with the legacy heuristic
    subvtt transcribe talk.mp3 -o talk.vtt    # Audio -> WebVTT captions
    subvtt completions bash > subvtt.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subvtt", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter_for(cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let config = load_or_create_config(&cli.config_path, cli.log_level.as_ref())?;

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter_for(config.log_level.clone()));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Convert { input_path, output, force_overwrite } => {
            controller.run_convert(input_path, output, force_overwrite).await
        }
        Commands::Number { input_path, output, remove, compat, force_overwrite } => {
            let mode = if remove { NumberingMode::Remove } else { NumberingMode::Add };
            controller.run_number(input_path, output, mode, compat, force_overwrite)
        }
        Commands::Transcribe { input_path, output, force_overwrite } => {
            controller.run_transcribe(input_path, output, force_overwrite).await
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

fn level_filter_for(level: app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn load_or_create_config(config_path: &str, cli_log_level: Option<&CliLogLevel>) -> Result<Config> {
    if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = cli_log_level {
            config.log_level = log_level.clone().into();
        }

        Ok(config)
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        // Apply command line log level to default config if specified
        if let Some(log_level) = cli_log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}
