//! Error types for the valuation pipeline.

use fairval_math::MathError;

/// Errors that can occur while configuring or running an evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Settings could not be read or written as JSON.
    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),
}
