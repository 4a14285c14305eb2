//! Generic call interception for Rust.
//!
//! Wrap a function so that a bundle of hooks runs around every call, sharing
//! one per-call [`Context`](prelude::Context) that can record events and
//! enforce requirements.
//!
//! ```
//! use veriphi::prelude::*;
//!
//! #[intercept]
//! fn add(a: i32, b: i32) -> Result<i32, String> {
//!     Ok(a + b)
//! }
//!
//! assert_eq!(add(2, 3), Ok(Some(5)));
//! assert!(!veriphi::VERSION.is_empty());
//! ```

// Self-reference so `#[intercept]` can reach `veriphi::veriphi_hooks` from within this crate.
extern crate self as veriphi;

pub use veriphi_internal::*;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export all common types for easy access.
pub mod prelude {
    pub use veriphi_internal::prelude::*;
}
