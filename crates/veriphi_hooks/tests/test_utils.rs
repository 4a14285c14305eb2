//! Shared test utilities for `veriphi_hooks` integration tests.
//!
//! Import via `mod test_utils;` in test files.

#![allow(
    dead_code,
    missing_docs,
    reason = "shared test utilities - not all items used in every test binary"
)]

use std::sync::{Arc, Mutex};

use thiserror::Error;
use veriphi_context::ContextError;

/// Error type used by wrapped test functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    /// Raised by a wrapped function body.
    #[error("body failed: {0}")]
    Body(String),
    /// Raised by a hook.
    #[error("hook failed: {0}")]
    Hook(String),
    /// Raised by a context operation.
    #[error(transparent)]
    Context(#[from] ContextError),
}

impl TestError {
    pub fn body(msg: impl Into<String>) -> Self {
        Self::Body(msg.into())
    }

    pub fn hook(msg: impl Into<String>) -> Self {
        Self::Hook(msg.into())
    }
}

/// Records labelled steps in the order they happen.
#[derive(Clone, Default)]
pub struct StepLog {
    steps: Arc<Mutex<Vec<String>>>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, step: impl Into<String>) {
        self.steps.lock().unwrap().push(step.into());
    }

    pub fn steps(&self) -> Vec<String> {
        self.steps.lock().unwrap().clone()
    }

    pub fn count(&self, step: &str) -> usize {
        self.steps.lock().unwrap().iter().filter(|s| *s == step).count()
    }
}
