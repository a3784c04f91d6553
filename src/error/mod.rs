//! Error types for the engine.
//!
//! Validation outcomes are never Rust errors: a rule failure is the caller's own
//! failure value. The types here cover what *surrounds* evaluation: what a rule
//! threw ([`Thrown`]) and configuration that cannot be satisfied ([`ConfigError`]).

mod config_error;
mod thrown;

pub use config_error::ConfigError;
pub use thrown::Thrown;
