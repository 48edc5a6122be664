//! Error types for the Tutor application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Tutor crates.
///
/// The controller never lets these escape a user action: every variant is
/// degraded into a chat message, a status line or an alert. They exist so the
/// adapters (HTTP, speech, config) can report what went wrong in a typed way.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorError {
    /// A textual mode name did not match any known mode
    #[error("Unknown chat mode: '{0}'")]
    UnknownMode(String),

    /// A textual question type did not match any known kind
    #[error("Unknown question type: '{0}'")]
    UnknownQuestionKind(String),

    /// The speech engine failed to start, stop or speak
    #[error("Speech error: {0}")]
    Speech(String),

    /// The request could not be sent or the reply could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl TutorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Speech error
    pub fn speech(message: impl Into<String>) -> Self {
        Self::Speech(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an UnknownMode error
    pub fn is_unknown_mode(&self) -> bool {
        matches!(self, Self::UnknownMode(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for common error types
// ============================================================================

impl From<std::io::Error> for TutorError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err.to_string())
    }
}

/// Result type alias using TutorError
pub type Result<T> = std::result::Result<T, TutorError>;
