//! Configuration errors.

/// Errors raised while building a validation config.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A size range whose lower bound exceeds its upper bound.
    #[error("invalid batch size range: min {min} is greater than max {max}")]
    InvertedRange {
        /// The requested minimum.
        min: usize,
        /// The requested maximum.
        max: usize,
    },
}
