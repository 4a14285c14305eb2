//! Per-call views handed to hooks and context providers.

use core::fmt;

use veriphi_context::SharedContext;

/// Observable identity of a wrapped function.
///
/// Rust functions carry no runtime name, so the wrapper records one. The
/// `#[intercept]` macro fills both fields from the function name and
/// `module_path!()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    name: &'static str,
    module: Option<&'static str>,
}

impl Target {
    /// Creates a target with the given function name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, module: None }
    }

    /// Sets the module path the function lives in.
    #[must_use]
    pub const fn with_module(mut self, module: &'static str) -> Self {
        self.module = Some(module);
        self
    }

    /// Returns the bare function name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the module path, if recorded.
    #[must_use]
    pub const fn module_path(&self) -> Option<&'static str> {
        self.module
    }

    /// Returns `module::name`, or the bare name without a module.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match self.module {
            Some(module) => format!("{module}::{}", self.name),
            None => self.name.to_owned(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.module {
            Some(module) => write!(f, "{module}::{}", self.name),
            None => f.write_str(self.name),
        }
    }
}

/// What every hook sees for the call in flight.
///
/// The same resolved context is shared by all hooks of one call.
pub struct Call<'a, A> {
    /// The context resolved for this call.
    pub context: &'a SharedContext,
    /// The wrapped function.
    pub target: Target,
    /// The call's arguments.
    pub args: &'a A,
}

impl<A> Clone for Call<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Call<'_, A> {}

impl<A: fmt::Debug> fmt::Debug for Call<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("target", &self.target)
            .field("args", self.args)
            .finish_non_exhaustive()
    }
}

/// What a context provider sees before any context exists.
pub struct CallSite<'a, A> {
    /// The wrapped function.
    pub target: Target,
    /// The call's arguments.
    pub args: &'a A,
    /// A context the caller supplied explicitly, if any.
    pub context: Option<&'a SharedContext>,
}

impl<A> Clone for CallSite<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for CallSite<'_, A> {}

impl<A: fmt::Debug> fmt::Debug for CallSite<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallSite")
            .field("target", &self.target)
            .field("args", self.args)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Values that may carry an explicitly supplied context.
///
/// Used by `#[intercept]` for a parameter named `context`.
pub trait AsContext {
    /// Returns the carried context, if there is one.
    fn as_context(&self) -> Option<&SharedContext>;
}

impl AsContext for SharedContext {
    fn as_context(&self) -> Option<&SharedContext> {
        Some(self)
    }
}

impl AsContext for Option<SharedContext> {
    fn as_context(&self) -> Option<&SharedContext> {
        self.as_ref()
    }
}

impl<T: AsContext + ?Sized> AsContext for &T {
    fn as_context(&self) -> Option<&SharedContext> {
        (**self).as_context()
    }
}

/// Return types an intercepted function body may produce.
pub trait CallResult {
    /// The success value.
    type Value;
    /// The error value.
    type Error;

    /// Converts into a plain `Result`.
    fn into_result(self) -> Result<Self::Value, Self::Error>;
}

impl<T, E> CallResult for Result<T, E> {
    type Value = T;
    type Error = E;

    fn into_result(self) -> Result<T, E> {
        self
    }
}

/// Return type of an intercepted call whose body returns `T`.
///
/// `Ok(None)` means the body failed and an `on_error` hook suppressed it.
pub type InterceptedResult<T> =
    Result<Option<<T as CallResult>::Value>, <T as CallResult>::Error>;
