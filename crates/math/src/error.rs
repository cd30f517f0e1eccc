//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
///
/// Arithmetic never produces these; NaN and infinity propagate instead.
/// They report inputs a caller should not have passed at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    /// Parameter outside its domain.
    #[error("invalid input: {name} = {value}")]
    InvalidInput {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}
