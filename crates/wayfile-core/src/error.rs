//! Error types shared across wayfile crates.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by a listing service.
///
/// The navigator never propagates these: their `Display` text becomes the
/// message of an error placeholder entry.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The request never produced a response.
    #[error("{message}")]
    Transport { message: String },

    /// The server refused the credentials.
    #[error("Not authorized to list files ({status})")]
    Unauthorized { status: u16 },

    /// The directory does not exist on the server.
    #[error("Directory not found: {path}")]
    NotFound { path: String },

    /// Any other non-success response.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body was not a valid listing.
    #[error("Invalid listing response: {message}")]
    Decode { message: String },
}

impl ListingError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Transport {
            message: if message.is_empty() {
                "Failed to load files".to_string()
            } else {
                message
            },
        }
    }

    /// Create an error for a non-success response.
    ///
    /// The server's response body is the message when it has one.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            format!("Failed to load files ({status})")
        } else {
            body
        };
        Self::Rejected { status, message }
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Rejected { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Errors reading or writing persisted preferences.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preferences file exists but could not be parsed.
    #[error("Invalid preferences file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Preferences could not be encoded.
    #[error("Failed to encode preferences: {message}")]
    Serialize { message: String },

    /// No location is available to store preferences.
    #[error("No config directory available")]
    NoConfigDir,
}

impl PreferenceError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
