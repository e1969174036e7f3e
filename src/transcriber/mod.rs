/*!
 * Transcription service boundary.
 *
 * The engine does not perform speech recognition itself; it hands an audio
 * file to an external collaborator and gets a flat transcript string back.
 * This module contains the trait describing that boundary and the HTTP
 * client for a whisper-style transcription server.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::TranscriberError;

/// Common trait for transcription backends
///
/// Implementations take a local audio file and return the transcript text,
/// or a structured error when the upstream call failed. The engine imposes
/// no timeout or cancellation policy of its own; those knobs belong to the
/// backend.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync + Debug {
    /// Transcribe an audio file to a flat transcript string
    ///
    /// # Arguments
    /// * `audio_path` - Path to the audio file to upload
    ///
    /// # Returns
    /// * `Result<String, TranscriberError>` - The transcript or an upstream error
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriberError>;

    /// Test the connection to the backend
    ///
    /// # Returns
    /// * `Result<(), TranscriberError>` - Ok if the backend is reachable
    async fn test_connection(&self) -> Result<(), TranscriberError>;
}

pub mod whisper_api;

pub use whisper_api::WhisperApi;
