//! Tracing integration for Veriphi.
//!
//! - [`TracingContext`] - a [`Context`](veriphi_context::Context) that forwards
//!   events to the `tracing` crate and enforces a deny-list of requirements
//! - [`TracingConfig`] - installs a `tracing-subscriber` registry
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use veriphi_context::SharedContext;
//! use veriphi_hooks::{HookBundle, Interceptor, Target};
//! use veriphi_tracing::{TracingConfig, TracingContext, TracingFormat};
//!
//! TracingConfig::default().with_format(TracingFormat::Json).init();
//!
//! let audited = Interceptor::new()
//!     .with_context_provider(|site| {
//!         Ok::<_, String>(Arc::new(TracingContext::for_target(site.target.name())) as SharedContext)
//!     })
//!     .with_hooks(HookBundle::new().with_before(|call| {
//!         call.context.emit("call:start", Default::default());
//!         Ok(())
//!     }))
//!     .wrap(Target::new("answer"), |_: &()| Ok(42));
//!
//! assert_eq!(audited.call(()), Ok(Some(42)));
//! ```

mod config;
mod context;
mod error;

pub use config::{TracingConfig, TracingFormat};
pub use context::{EVENTS_TARGET, TracingContext};
pub use error::TracingError;
