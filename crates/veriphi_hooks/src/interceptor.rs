//! The invocation wrapper.
//!
//! An [`Interceptor`] decides, for every call of a wrapped function, which
//! context backs the call and which hooks run around it.
//!
//! # Per-call sequence
//!
//! 1. Resolve the context: the configured [`ContextProvider`], else the
//!    caller-supplied context, else a fresh [`NullContext`].
//! 2. Select the active [`HookBundle`] from the [`HookSource`].
//! 3. Run `before`. An error aborts here; the body never runs.
//! 4. Run the body.
//! 5. On success run `after`, whose return value replaces the result.
//! 6. On failure run `on_error`, whose [`ErrorAction`] decides between
//!    re-raising, suppressing (`Ok(None)`) or recovering with a value.
//!
//! Errors from a provider, `after` or `on_error` propagate as-is.
//!
//! # Example
//!
//! ```
//! use veriphi_hooks::{HookBundle, Interceptor, Target};
//!
//! let double = Interceptor::new()
//!     .with_hooks(HookBundle::new().with_after(|_call, result: i32| Ok(result * 2)))
//!     .wrap(Target::new("three"), |_: &()| Ok::<_, String>(3));
//!
//! assert_eq!(double.call(()), Ok(Some(6)));
//! ```

use core::fmt;
use std::borrow::Cow;
use std::sync::Arc;

use veriphi_context::{Metadata, NullContext, SharedContext};

use crate::bundle::{ErrorAction, HookBundle, HookFactory};
use crate::call::{Call, CallSite, Target};

/// Strategy that produces the context for a call.
pub type ContextProvider<A, E> =
    Arc<dyn Fn(&CallSite<'_, A>) -> Result<SharedContext, E> + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// HookSource
// ─────────────────────────────────────────────────────────────────────────────

/// Where the active bundle of a call comes from.
///
/// Exactly one source is configured at a time.
pub enum HookSource<A, R, E> {
    /// One bundle reused for every call.
    Static(HookBundle<A, R, E>),
    /// A factory evaluated once per call with the context's metadata.
    Factory(HookFactory<A, R, E>),
}

impl<A, R, E> Default for HookSource<A, R, E> {
    fn default() -> Self {
        Self::Static(HookBundle::default())
    }
}

impl<A, R, E> Clone for HookSource<A, R, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(bundle) => Self::Static(bundle.clone()),
            Self::Factory(factory) => Self::Factory(Arc::clone(factory)),
        }
    }
}

impl<A, R, E> fmt::Debug for HookSource<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(bundle) => f.debug_tuple("Static").field(bundle).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl<A, R, E> HookSource<A, R, E> {
    /// Returns the bundle active for a call resolved to `context`.
    ///
    /// Only a factory source takes the metadata snapshot.
    pub fn resolve(&self, context: &SharedContext) -> Cow<'_, HookBundle<A, R, E>> {
        match self {
            Self::Static(bundle) => Cow::Borrowed(bundle),
            Self::Factory(factory) => Cow::Owned(factory(&context.metadata())),
        }
    }
}

impl<A, R, E> From<HookBundle<A, R, E>> for HookSource<A, R, E> {
    fn from(bundle: HookBundle<A, R, E>) -> Self {
        Self::Static(bundle)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interceptor
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration shared by every call of a wrapped function.
///
/// The interceptor keeps no per-call state, so one instance may serve
/// concurrent calls. Only a context or bundle the caller shares across calls
/// can be mutated concurrently, and synchronizing it is the caller's job.
pub struct Interceptor<A, R, E> {
    hooks: HookSource<A, R, E>,
    context_provider: Option<ContextProvider<A, E>>,
}

impl<A, R, E> Default for Interceptor<A, R, E> {
    fn default() -> Self {
        Self {
            hooks: HookSource::default(),
            context_provider: None,
        }
    }
}

impl<A, R, E> Clone for Interceptor<A, R, E> {
    fn clone(&self) -> Self {
        Self {
            hooks: self.hooks.clone(),
            context_provider: self.context_provider.clone(),
        }
    }
}

impl<A, R, E> fmt::Debug for Interceptor<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("hooks", &self.hooks)
            .field("context_provider", &self.context_provider.is_some())
            .finish()
    }
}

impl<A, R, E> Interceptor<A, R, E> {
    /// Creates an interceptor with no hooks and default context resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuses `bundle` for every call, replacing any hook factory.
    #[must_use]
    pub fn with_hooks(mut self, bundle: HookBundle<A, R, E>) -> Self {
        self.hooks = HookSource::Static(bundle);
        self
    }

    /// Builds the bundle per call with `factory`, replacing any static bundle.
    #[must_use]
    pub fn with_hook_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Metadata) -> HookBundle<A, R, E> + Send + Sync + 'static,
    {
        self.hooks = HookSource::Factory(Arc::new(factory));
        self
    }

    /// Sets the hook source directly.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<HookSource<A, R, E>>) -> Self {
        self.hooks = source.into();
        self
    }

    /// Resolves every call's context with `provider`.
    ///
    /// The provider also sees any caller-supplied context through
    /// [`CallSite::context`] and is free to ignore it.
    #[must_use]
    pub fn with_context_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&CallSite<'_, A>) -> Result<SharedContext, E> + Send + Sync + 'static,
    {
        self.context_provider = Some(Arc::new(provider));
        self
    }

    /// Returns the configured hook source.
    #[must_use]
    pub fn source(&self) -> &HookSource<A, R, E> {
        &self.hooks
    }

    /// Returns `true` when a context provider is configured.
    #[must_use]
    pub fn has_context_provider(&self) -> bool {
        self.context_provider.is_some()
    }

    /// Resolves the context for a call.
    ///
    /// Precedence: the context provider, then the caller-supplied context,
    /// then a fresh [`NullContext`].
    pub fn resolve_context(&self, site: &CallSite<'_, A>) -> Result<SharedContext, E> {
        if let Some(provider) = &self.context_provider {
            return provider(site);
        }
        Ok(match site.context {
            Some(context) => Arc::clone(context),
            None => NullContext::shared(),
        })
    }

    /// Runs one intercepted call of `body`.
    ///
    /// `context` is the caller-supplied context candidate. Returns `Ok(None)`
    /// only when `on_error` suppressed a body error.
    pub fn invoke<F>(
        &self,
        target: Target,
        args: &A,
        context: Option<&SharedContext>,
        body: F,
    ) -> Result<Option<R>, E>
    where
        F: FnOnce(&A) -> Result<R, E>,
    {
        let site = CallSite {
            target,
            args,
            context,
        };
        let context = self.resolve_context(&site)?;
        let hooks = self.hooks.resolve(&context);

        #[cfg(feature = "tracing")]
        tracing::trace!(function = %target, hooks = ?hooks, "intercepting call");

        let call = Call {
            context: &context,
            target,
            args,
        };

        if let Some(before) = hooks.before() {
            before(&call)?;
        }

        let error = match body(args) {
            Ok(result) => {
                return match hooks.after() {
                    Some(after) => after(&call, result).map(Some),
                    None => Ok(Some(result)),
                };
            }
            Err(error) => error,
        };

        let Some(on_error) = hooks.on_error() else {
            return Err(error);
        };

        match on_error(&call, &error)? {
            ErrorAction::Propagate => Err(error),
            ErrorAction::Suppress => {
                #[cfg(feature = "tracing")]
                tracing::trace!(function = %target, "error suppressed by on_error hook");
                Ok(None)
            }
            ErrorAction::Recover(value) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(function = %target, "error recovered by on_error hook");
                Ok(Some(value))
            }
        }
    }

    /// Binds this interceptor to `body`, producing a callable wrapper.
    #[must_use]
    pub fn wrap<F>(self, target: Target, body: F) -> Intercepted<F, A, R, E>
    where
        F: Fn(&A) -> Result<R, E>,
    {
        Intercepted {
            interceptor: self,
            target,
            body,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Intercepted
// ─────────────────────────────────────────────────────────────────────────────

/// A function bundled with the interceptor that wraps it.
///
/// Created by [`Interceptor::wrap`]. For wrapping free functions while keeping
/// their signature, prefer the `#[intercept]` attribute.
pub struct Intercepted<F, A, R, E> {
    interceptor: Interceptor<A, R, E>,
    target: Target,
    body: F,
}

impl<F, A, R, E> fmt::Debug for Intercepted<F, A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intercepted")
            .field("target", &self.target)
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}

impl<F, A, R, E> Intercepted<F, A, R, E>
where
    F: Fn(&A) -> Result<R, E>,
{
    /// Calls the wrapped function, resolving the context without a caller
    /// candidate.
    pub fn call(&self, args: A) -> Result<Option<R>, E> {
        self.interceptor.invoke(self.target, &args, None, &self.body)
    }

    /// Calls the wrapped function with a caller-supplied context.
    ///
    /// Hooks observe `context` unless a context provider is configured.
    pub fn call_with_context(&self, context: SharedContext, args: A) -> Result<Option<R>, E> {
        self.interceptor
            .invoke(self.target, &args, Some(&context), &self.body)
    }

    /// Returns the identity of the wrapped function.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the interceptor in use.
    #[must_use]
    pub fn interceptor(&self) -> &Interceptor<A, R, E> {
        &self.interceptor
    }
}
