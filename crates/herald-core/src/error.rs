//! Error types for Herald core
//!
//! Covers configuration loading; transport failures live in
//! [`crate::transport::SendError`] so they can travel inside dispatch
//! outcomes.

use std::path::PathBuf;

/// Configuration loading errors
///
/// The one failure class the host may treat as fatal: everything after
/// startup degrades instead of aborting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("config unreadable at {path}: {source}")]
    Unreadable {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON or fails the schema
    #[error("config invalid at {path}: {source}")]
    Invalid {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Config values are structurally valid but unusable
    #[error("config rejected: {0}")]
    Rejected(String),
}
