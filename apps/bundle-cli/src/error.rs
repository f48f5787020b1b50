//! # App Error Type
//!
//! Unified error type for the bundle front end.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in bundle-cli                             │
//! │                                                                         │
//! │  startup ── config read/parse ── ConfigRead / ConfigParse ─► exit 1     │
//! │                                                                         │
//! │  each input line                                                        │
//! │     │                                                                   │
//! │     ├── parse failure ──── UnknownCommand / InvalidArgument ─┐          │
//! │     │                                                        ├─► stderr │
//! │     └── engine failure ─── Bundle(BundleError) ──────────────┘  (next   │
//! │                                                                  line)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json`, line errors are written as `{"code": ..., "message": ...}`.

use std::io;
use std::path::PathBuf;

use bundle_core::BundleError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    #[error("Invalid argument for '{command}': {reason}")]
    InvalidArgument { command: String, reason: String },

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error codes for machine-readable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id not in the catalog
    InvalidProduct,

    /// Catalog, settings or quantity rejected
    ValidationError,

    /// Input line could not be parsed
    BadCommand,

    /// Config file missing or malformed
    ConfigError,

    /// Output could not be written
    Internal,
}

impl AppError {
    pub fn invalid_argument(command: &str, reason: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::ConfigRead { .. } | AppError::ConfigParse { .. } => ErrorCode::ConfigError,
            AppError::UnknownCommand(_) | AppError::InvalidArgument { .. } => ErrorCode::BadCommand,
            AppError::Bundle(BundleError::InvalidProduct(_)) => ErrorCode::InvalidProduct,
            AppError::Bundle(BundleError::Validation(_)) => ErrorCode::ValidationError,
            AppError::Io(_) | AppError::Json(_) => ErrorCode::Internal,
        }
    }

    /// Serializable form of this error.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// What `--json` mode prints for a failed line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

pub type AppResult<T> = Result<T, AppError>;
