use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::app_config::TranscriptionConfig;
use crate::errors::TranscriberError;
use crate::transcriber::TranscriptionBackend;

/// Client for a whisper-style transcription server
///
/// The server accepts a single audio file upload as the `audio` multipart
/// field on `POST /transcribe` and answers with a JSON body carrying the
/// transcript, or an error message on failure.
#[derive(Debug)]
pub struct WhisperApi {
    /// Base URL of the transcription service
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Success response from the transcription server
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Plain transcript text
    pub transcription: String,
}

/// Error response from the transcription server
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionErrorResponse {
    /// Error message from the server
    pub error: String,
}

impl WhisperApi {
    /// Create a new client from a complete URL
    #[allow(dead_code)]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            base_url: url.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(300))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
            backoff_base_ms: 1000,
        }
    }

    /// Create a new client from the transcription configuration
    pub fn with_config(config: &TranscriptionConfig) -> Self {
        Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_ms,
        }
    }

    async fn upload_once(&self, audio_path: &Path) -> Result<String, TranscriberError> {
        let url = format!("{}/transcribe", self.base_url);

        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());

        let bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TranscriberError::RequestFailed(
                format!("Failed to read audio file {:?}: {}", audio_path, e),
            ))?;

        let form = Form::new().part("audio", Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    TranscriberError::ConnectionError(e.to_string())
                } else {
                    TranscriberError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranscriberError::ParseError(e.to_string()))?;

        if !status.is_success() {
            // The server reports failures as { "error": "..." }
            let message = serde_json::from_str::<TranscriptionErrorResponse>(&body)
                .map(|parsed| parsed.error)
                .unwrap_or(body);
            return Err(TranscriberError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&body)
            .map_err(|e| TranscriberError::ParseError(
                format!("{} (body starts with: {})", e, body.chars().take(120).collect::<String>()),
            ))?;

        Ok(parsed.transcription)
    }
}

#[async_trait]
impl TranscriptionBackend for WhisperApi {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriberError> {
        let mut attempt = 0;
        loop {
            match self.upload_once(audio_path).await {
                Ok(transcript) => return Ok(transcript),
                Err(e) => {
                    // Service-level failures are not retried; the server
                    // already processed the upload and said no
                    let retryable = matches!(
                        e,
                        TranscriberError::ConnectionError(_) | TranscriberError::RequestFailed(_)
                    );
                    if !retryable || attempt >= self.max_retries {
                        error!("Transcription failed after {} attempt(s): {}", attempt + 1, e);
                        return Err(e);
                    }

                    let backoff_ms = self.backoff_base_ms * 2u64.pow(attempt);
                    debug!(
                        "Transcription attempt {} failed ({}), retrying in {}ms",
                        attempt + 1, e, backoff_ms
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), TranscriberError> {
        self.client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| TranscriberError::ConnectionError(e.to_string()))?;
        Ok(())
    }
}
