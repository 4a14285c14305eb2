//! Error types for subscriber setup.

use thiserror::Error;

/// Errors that can occur while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    /// The configured filter directive could not be parsed.
    #[error("Invalid filter '{filter}': {reason}")]
    InvalidFilter {
        /// The rejected directive string.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("Subscriber already installed: {0}")]
    AlreadyInitialized(String),
}
