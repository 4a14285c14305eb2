//! The [`Context`] capability trait.

use std::sync::Arc;

use downcast_rs::{DowncastSync, impl_downcast};

use crate::error::ContextError;

/// Key/value metadata carried by contexts and event payloads.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A resolved context shared by every hook of a single call.
pub type SharedContext = Arc<dyn Context>;

/// The capability set a per-call state object must provide.
///
/// Any type implementing these operations is a valid context; there is no
/// common base to inherit from. Hooks that need the concrete type can recover
/// it through the downcast helpers generated for `dyn Context`
/// (`downcast_ref`, `downcast_arc`, `is`).
///
/// # Failure contract
///
/// - [`emit`](Self::emit) never fails. Implementations that forward to a sink
///   must absorb sink errors themselves.
/// - [`bind`](Self::bind) and [`ensure`](Self::ensure) may fail. An error from
///   either, raised inside a hook, propagates to the caller of the wrapped
///   function.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use veriphi_context::{Context, ContextError, Metadata, SharedContext};
///
/// struct ReadOnly;
///
/// impl Context for ReadOnly {
///     fn bind(self: Arc<Self>, _metadata: Metadata) -> Result<SharedContext, ContextError> {
///         Ok(self)
///     }
///
///     fn emit(&self, _event: &str, _payload: Metadata) {}
///
///     fn ensure(&self, requirement: &str, _details: Metadata) -> Result<(), ContextError> {
///         if requirement.starts_with("write") {
///             return Err(ContextError::requirement_failed(requirement, "read-only context"));
///         }
///         Ok(())
///     }
/// }
///
/// let context: SharedContext = Arc::new(ReadOnly);
/// assert!(context.ensure("read:invoices", Metadata::new()).is_ok());
/// assert!(context.ensure("write:invoices", Metadata::new()).is_err());
/// ```
pub trait Context: DowncastSync {
    /// Returns a context enriched with `metadata`.
    ///
    /// Implementations choose whether to enrich in place and return the same
    /// instance, or to return a new child context.
    fn bind(self: Arc<Self>, metadata: Metadata) -> Result<SharedContext, ContextError>;

    /// Publishes a named event with an arbitrary payload.
    fn emit(&self, event: &str, payload: Metadata);

    /// Enforces a requirement, returning an error to abort the call.
    fn ensure(&self, requirement: &str, details: Metadata) -> Result<(), ContextError>;

    /// Returns a snapshot of the metadata this context exposes.
    ///
    /// Hook factories are driven by this snapshot. Contexts without
    /// introspectable metadata keep the default, an empty map.
    fn metadata(&self) -> Metadata {
        Metadata::new()
    }
}

impl_downcast!(sync Context);
