//! The context capability consumed by Veriphi interception (Layer 1).
//!
//! Every intercepted call resolves exactly one [`Context`] and hands it to each
//! hook that runs during that call. A context is anything that can:
//!
//! - [`bind`](Context::bind) extra metadata and hand back a usable context
//! - [`emit`](Context::emit) a named event with a payload, without failing
//! - [`ensure`](Context::ensure) a requirement, failing to abort the call
//!
//! Conformance is purely structural: implement the trait on your own type, no
//! base type is involved. [`NullContext`] is the zero-configuration fallback used
//! when a call supplies nothing better.
//!
//! # Example
//!
//! ```
//! use veriphi_context::{Context, NullContext, metadata};
//!
//! let context = NullContext::shared();
//! let context = context.bind(metadata! { "tenant": "acme" }).unwrap();
//! context.emit("audit:read", metadata! { "table": "invoices" });
//!
//! let null = context.downcast_ref::<NullContext>().unwrap();
//! assert_eq!(null.events().len(), 1);
//! assert_eq!(null.get("tenant"), Some(serde_json::json!("acme")));
//! ```

mod context;
mod error;
mod null;

pub use context::{Context, Metadata, SharedContext};
pub use error::ContextError;
pub use null::NullContext;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Builds a [`Metadata`] map from `"key": value` pairs.
///
/// Values are anything [`serde_json::json!`] accepts.
///
/// ```
/// use veriphi_context::metadata;
///
/// let meta = metadata! { "user": "ada", "attempt": 2 };
/// assert_eq!(meta.len(), 2);
/// assert!(metadata! {}.is_empty());
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::new()
    };
    ($($key:literal : $value:expr),+ $(,)?) => {{
        let mut map = $crate::Metadata::new();
        $(
            map.insert(
                ::std::string::String::from($key),
                $crate::__private::serde_json::json!($value),
            );
        )+
        map
    }};
}
