use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Transcription service config
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Transcript segmentation config
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Transcription service configuration
///
/// Points at a whisper-style HTTP service that accepts an audio upload on
/// `POST /transcribe` and returns a plain transcript string.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// Service endpoint URL
    #[serde(default = "default_transcription_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub max_retries: u32,

    /// Backoff base for retries (in milliseconds, doubled on each retry)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_transcription_endpoint(),
            timeout_secs: default_transcription_timeout_secs(),
            max_retries: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Transcript segmentation configuration
///
/// The defaults reproduce the fixed-cadence formula exactly: 36-character
/// lines, cue starts advancing 2 seconds per line pair, every cue spanning
/// 4 seconds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Maximum characters per caption line
    #[serde(default = "default_max_line_chars")]
    pub max_line_chars: usize,

    /// Seconds each cue start advances past the previous one
    #[serde(default = "default_line_advance_secs")]
    pub line_advance_secs: u64,

    /// Seconds each cue stays on screen
    #[serde(default = "default_cue_duration_secs")]
    pub cue_duration_secs: u64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_line_chars: default_max_line_chars(),
            line_advance_secs: default_line_advance_secs(),
            cue_duration_secs: default_cue_duration_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_transcription_endpoint() -> String {
    // Local whisper wrapper service
    "http://localhost:3001".to_string()
}

fn default_transcription_timeout_secs() -> u64 {
    // Whisper runs can take a while on long recordings
    300
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_max_line_chars() -> usize {
    36
}

fn default_line_advance_secs() -> u64 {
    2
}

fn default_cue_duration_secs() -> u64 {
    4
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.transcription.endpoint)
            .map_err(|e| anyhow!("Invalid transcription endpoint '{}': {}", self.transcription.endpoint, e))?;

        if self.transcription.timeout_secs == 0 {
            return Err(anyhow!("Transcription timeout must be greater than zero"));
        }

        if self.segmenter.max_line_chars == 0 {
            return Err(anyhow!("Segmenter line width must be greater than zero"));
        }

        if self.segmenter.cue_duration_secs == 0 {
            return Err(anyhow!("Segmenter cue duration must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            transcription: TranscriptionConfig::default(),
            segmenter: SegmenterConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
