//! Hook bundles and the invocation wrapper for Veriphi (Layer 2).
//!
//! This crate attaches cross-cutting behavior (auditing, permission checks,
//! tracing) to ordinary functions without touching their bodies. Each call of a
//! wrapped function resolves a [`Context`](veriphi_context::Context) and runs
//! optional lifecycle hooks around the body.
//!
//! # Quick Start
//!
//! ```
//! use veriphi_context::metadata;
//! use veriphi_hooks::{HookBundle, Interceptor, intercept};
//!
//! fn audited() -> Interceptor<(i64, i64), i64, String> {
//!     Interceptor::new().with_hooks(
//!         HookBundle::new()
//!             .with_before(|call| {
//!                 call.context.emit("hook:before", metadata! { "fn": call.target.name() });
//!                 Ok(())
//!             })
//!             .with_after(|call, result| {
//!                 call.context.emit("hook:after", metadata! { "result": result });
//!                 Ok(result)
//!             }),
//!     )
//! }
//!
//! #[intercept(audited())]
//! fn add(a: i64, b: i64) -> Result<i64, String> {
//!     Ok(a + b)
//! }
//!
//! assert_eq!(add(1, 2), Ok(Some(3)));
//! ```
//!
//! # Architecture
//!
//! - [`HookBundle`] - up to three optional callbacks with a per-slot merge
//! - [`HookFactory`] / [`HookSource`] - static bundle or per-call factory
//! - [`Interceptor`] - context resolution and the per-call hook sequence
//! - [`Intercepted`] - an interceptor bound to a closure
//! - [`macro@intercept`] - attribute that wraps a free function in place
//!
//! # Result contract
//!
//! Intercepted calls return `Result<Option<R>, E>`. `Ok(None)` is reserved for
//! a body error that an `on_error` hook suppressed; body errors that are not
//! handled come back as the very same `E` value.

// Self-reference so `#[intercept]`-generated code can use `veriphi_hooks::` paths within this crate.
extern crate self as veriphi_hooks;

pub mod bundle;
pub mod call;
pub mod interceptor;

pub use bundle::{AfterHook, BeforeHook, ErrorAction, ErrorHook, HookBundle, HookFactory};
pub use call::{AsContext, Call, CallResult, CallSite, InterceptedResult, Target};
pub use interceptor::{ContextProvider, HookSource, Intercepted, Interceptor};

// Re-export the decorator macro.
pub use hook_macros::intercept;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::bundle::{ErrorAction, HookBundle, HookFactory};
    pub use crate::call::{Call, CallSite, Target};
    pub use crate::interceptor::{HookSource, Intercepted, Interceptor};
    pub use hook_macros::intercept;
    pub use veriphi_context::{Context, ContextError, Metadata, NullContext, SharedContext};
}
