/*!
 * Error types for the morse translator.
 *
 * The codec never fails, so the only library errors come from audio
 * output and configuration. Both use the thiserror crate; the binary
 * wraps them into `anyhow` with context.
 */

use thiserror::Error;

/// Errors that can occur while acquiring or driving an audio sink
#[derive(Error, Debug)]
pub enum AudioError {
    /// No output device or line could be acquired
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    /// The sink cannot handle the requested PCM format
    #[error("Unsupported audio format: {0}")]
    Format(String),

    /// The device failed while playing
    #[error("Audio device error: {0}")]
    Device(String),

    /// Writing rendered audio failed
    #[error("Audio I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Whether the error means the output could not be acquired at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Errors found while validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field holds a value outside its accepted range
    #[error("Invalid configuration value for '{field}': {reason}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from audio playback
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

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
