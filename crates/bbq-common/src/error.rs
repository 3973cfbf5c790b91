//! Unified error types for the bbq workspace.
//!
//! The client and driver crates define their own error enums; this one
//! covers failures that happen before any remote call is made.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BbqError {
    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BbqError>;
