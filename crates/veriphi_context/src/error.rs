//! Error types raised by context operations.

use thiserror::Error;

/// Errors a [`Context`](crate::Context) may raise from `bind` or `ensure`.
///
/// `emit` has no error path; contexts swallow or log emission failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A requirement checked through `ensure` does not hold.
    #[error("Requirement '{requirement}' not satisfied: {reason}")]
    RequirementFailed {
        /// The requirement name passed to `ensure`.
        requirement: String,
        /// Why the requirement was rejected.
        reason: String,
    },

    /// The context refused the metadata passed to `bind`.
    #[error("Bind error: {0}")]
    BindRejected(String),

    /// A context provider could not produce a context for the call.
    #[error("Context unavailable: {0}")]
    Unavailable(String),
}

impl ContextError {
    /// Creates a [`RequirementFailed`](Self::RequirementFailed).
    pub fn requirement_failed(requirement: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RequirementFailed {
            requirement: requirement.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`BindRejected`](Self::BindRejected).
    pub fn bind_rejected(msg: impl Into<String>) -> Self {
        Self::BindRejected(msg.into())
    }

    /// Creates an [`Unavailable`](Self::Unavailable).
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
