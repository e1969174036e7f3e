/*!
 * Error types for the subvtt application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the transcription service
#[derive(Error, Debug)]
pub enum TranscriberError {
    /// Error when making the upload request fails
    #[error("Transcription request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing the service response fails
    #[error("Failed to parse transcription response: {0}")]
    ParseError(String),

    /// Error returned by the service itself
    #[error("Transcription service responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while parsing or transforming caption documents
#[derive(Error, Debug)]
pub enum CaptionError {
    /// The document does not carry the required WEBVTT header
    #[error("Invalid VTT document: {0}")]
    InvalidFormat(String),

    /// A timestamp could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the transcription service
    #[error("Transcriber error: {0}")]
    Transcriber(#[from] TranscriberError),

    /// Error from caption processing
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
