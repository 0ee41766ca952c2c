//! Error types for latex-drill-core.
//!
//! Grading and scheduling are total and never fail; only loading
//! configuration data (the equivalence table, scheduler and quality
//! parameters) can.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("equivalence group {index} has fewer than two distinct members")]
    DegenerateGroup { index: usize },

    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// A quality score outside the 0..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quality score {0} is outside 0..=5")]
pub struct QualityOutOfRange(pub i32);
