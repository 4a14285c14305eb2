//! # Veriphi Internal Library
//!
//! Re-exports the core Veriphi crates for convenience.

/// Layer 1: the context capability and its fallback.
pub use veriphi_context;

/// Layer 2: hook bundles and the invocation wrapper.
pub use veriphi_hooks;

/// Tracing-backed context and subscriber setup.
pub use veriphi_tracing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use veriphi_hooks::prelude::*;
    pub use veriphi_tracing::{TracingConfig, TracingContext, TracingFormat};
}
