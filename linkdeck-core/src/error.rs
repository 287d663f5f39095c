//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for linkdeck
//!
//! This module defines the error enum used across the library. Each variant
//! carries enough context for the log line that accompanies it; the binary
//! wraps these in `anyhow` at its edge.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all linkdeck operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading the link list from disk failed.
    #[error("Failed to read link list {path:?}: {source}")]
    SourceIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialization error.
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a generated file failed.
    #[error("Failed to write {path:?}: {source}")]
    OutputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The platform gave us no config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a success status.
    #[error("HTTP error! status: {status} ({url})")]
    HttpStatus { url: String, status: u16 },

    /// A URL did not parse or lacked a required part.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Input validation errors
    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    /// The system browser could not be launched.
    #[error("Failed to open {url}: {reason}")]
    Browser { url: String, reason: String },
}

impl AppError {
    /// Create a link-list read error
    pub fn source_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::SourceIo {
            path: path.into(),
            source,
        }
    }

    /// Create a config file access error
    pub fn config_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }

    pub fn output_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::OutputIo {
            path: path.into(),
            source,
        }
    }

    /// Create a non-success HTTP status error
    pub fn http_status<S: Into<String>>(url: S, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url<S1: Into<String>, S2: Into<String>>(url: S1, reason: S2) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an input validation error
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a browser launch error
    pub fn browser<S1: Into<String>, S2: Into<String>>(url: S1, reason: S2) -> Self {
        Self::Browser {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure is a permission problem on the local filesystem.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::SourceIo { source: e, .. }
            | Self::ConfigIo { source: e, .. }
            | Self::OutputIo { source: e, .. } => e.kind() == io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_mentions_code() {
        let err = AppError::http_status("http://localhost/config.json", 404);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn permission_denied_detection() {
        let err = AppError::source_io(
            "config.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(err.is_permission_denied());
        assert!(!AppError::NoConfigDir.is_permission_denied());
    }
}
