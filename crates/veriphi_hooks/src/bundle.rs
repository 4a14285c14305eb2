//! Hook bundles: up to three optional lifecycle callbacks.
//!
//! A [`HookBundle`] holds a `before`, an `after` and an `on_error` callback,
//! each independently optional. An empty bundle is a valid no-op wrapper.
//!
//! # Merge
//!
//! [`HookBundle::merge`] resolves every slot on its own: the left bundle's
//! callback when it has one, otherwise the right bundle's. Layer a call-specific
//! override over a base bundle with `overrides.merge(&base)`.
//!
//! ```
//! use veriphi_hooks::HookBundle;
//!
//! let base: HookBundle<(), u32, String> = HookBundle::new()
//!     .with_before(|_call| Ok(()))
//!     .with_after(|_call, result| Ok(result));
//! let overrides = HookBundle::new().with_after(|_call, result: u32| Ok(result + 1));
//!
//! let merged = overrides.merge(&base);
//! assert!(merged.before().is_some());
//! assert!(merged.after().is_some());
//! assert!(merged.on_error().is_none());
//! ```

use core::fmt;
use std::sync::Arc;

use veriphi_context::Metadata;

use crate::call::Call;

/// Callback run before the wrapped function. An error aborts the call.
pub type BeforeHook<A, E> = Arc<dyn Fn(&Call<'_, A>) -> Result<(), E> + Send + Sync>;

/// Callback run after a successful call. Its return value replaces the result.
pub type AfterHook<A, R, E> = Arc<dyn Fn(&Call<'_, A>, R) -> Result<R, E> + Send + Sync>;

/// Callback run when the wrapped function fails. Decides what the caller sees.
pub type ErrorHook<A, R, E> =
    Arc<dyn Fn(&Call<'_, A>, &E) -> Result<ErrorAction<R>, E> + Send + Sync>;

/// Builds the active bundle for one call from a context metadata snapshot.
pub type HookFactory<A, R, E> = Arc<dyn Fn(&Metadata) -> HookBundle<A, R, E> + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// ErrorAction
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome chosen by an `on_error` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorAction<R> {
    /// Re-raise the original error unchanged.
    #[default]
    Propagate,
    /// Swallow the error; the caller receives `Ok(None)`.
    Suppress,
    /// Swallow the error and hand the caller this value instead.
    Recover(R),
}

impl<R> ErrorAction<R> {
    /// Returns `true` unless the action is [`Propagate`](Self::Propagate).
    #[must_use]
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Propagate)
    }
}

impl<R> From<bool> for ErrorAction<R> {
    /// `true` suppresses, `false` propagates.
    fn from(suppress: bool) -> Self {
        if suppress {
            Self::Suppress
        } else {
            Self::Propagate
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HookBundle
// ─────────────────────────────────────────────────────────────────────────────

/// Container for the optional lifecycle callbacks of a wrapped function.
///
/// Type parameters follow the wrapped function: `A` is its argument tuple, `R`
/// its success value and `E` its error. Callbacks are reference-counted, so
/// cloning and merging bundles never copies closures.
pub struct HookBundle<A, R, E> {
    before: Option<BeforeHook<A, E>>,
    after: Option<AfterHook<A, R, E>>,
    on_error: Option<ErrorHook<A, R, E>>,
}

impl<A, R, E> Default for HookBundle<A, R, E> {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            on_error: None,
        }
    }
}

impl<A, R, E> Clone for HookBundle<A, R, E> {
    fn clone(&self) -> Self {
        Self {
            before: self.before.clone(),
            after: self.after.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<A, R, E> fmt::Debug for HookBundle<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookBundle")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl<A, R, E> HookBundle<A, R, E> {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `before` callback.
    #[must_use]
    pub fn with_before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Call<'_, A>) -> Result<(), E> + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(hook));
        self
    }

    /// Sets the `after` callback.
    #[must_use]
    pub fn with_after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Call<'_, A>, R) -> Result<R, E> + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(hook));
        self
    }

    /// Sets the `on_error` callback.
    #[must_use]
    pub fn with_on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Call<'_, A>, &E) -> Result<ErrorAction<R>, E> + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Sets an `on_error` callback from a suppression predicate.
    ///
    /// The error is suppressed when `predicate` returns `true` and re-raised
    /// otherwise.
    #[must_use]
    pub fn with_error_filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&Call<'_, A>, &E) -> bool + Send + Sync + 'static,
    {
        self.with_on_error(move |call, error| Ok(ErrorAction::from(predicate(call, error))))
    }

    /// Returns the `before` callback, if set.
    #[must_use]
    pub fn before(&self) -> Option<&BeforeHook<A, E>> {
        self.before.as_ref()
    }

    /// Returns the `after` callback, if set.
    #[must_use]
    pub fn after(&self) -> Option<&AfterHook<A, R, E>> {
        self.after.as_ref()
    }

    /// Returns the `on_error` callback, if set.
    #[must_use]
    pub fn on_error(&self) -> Option<&ErrorHook<A, R, E>> {
        self.on_error.as_ref()
    }

    /// Returns `true` when no slot is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none() && self.on_error.is_none()
    }

    /// Combines two bundles slot by slot, preferring callbacks from `self`.
    ///
    /// Neither input is modified.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            before: self.before.clone().or_else(|| other.before.clone()),
            after: self.after.clone().or_else(|| other.after.clone()),
            on_error: self.on_error.clone().or_else(|| other.on_error.clone()),
        }
    }
}
