//! A [`Context`] backed by the `tracing` crate.

use std::sync::Arc;

use hashbrown::HashSet;
use serde_json::Value;
use veriphi_context::{Context, ContextError, Metadata, SharedContext};

/// Target under which [`TracingContext`] publishes events.
///
/// Filter on it to route audit events separately from ordinary logs, e.g.
/// `"veriphi::events=debug"`.
pub const EVENTS_TARGET: &str = "veriphi::events";

/// Context that forwards events to `tracing` and enforces a deny-list.
///
/// - [`emit`](Context::emit) logs an `INFO` event on [`EVENTS_TARGET`] carrying
///   the event name, its payload and the context's bound fields
/// - [`ensure`](Context::ensure) logs at `DEBUG` and succeeds, unless the
///   requirement was [denied](Self::deny), in which case it logs at `WARN`
///   and fails with [`ContextError::RequirementFailed`]
/// - [`bind`](Context::bind) returns a child context with the merged fields;
///   the parent is left untouched and the deny-list is shared
#[derive(Debug, Clone, Default)]
pub struct TracingContext {
    fields: Metadata,
    denied: Arc<HashSet<String>>,
}

impl TracingContext {
    /// Creates a context with no fields and an empty deny-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context tagged with the name of the function being called.
    #[must_use]
    pub fn for_target(name: &str) -> Self {
        Self::new().with_field("function", name)
    }

    /// Adds a field reported with every event.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Denies `requirement`; [`ensure`](Context::ensure) will reject it.
    #[must_use]
    pub fn deny(mut self, requirement: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.denied).insert(requirement.into());
        self
    }

    /// Returns the bound fields.
    #[must_use]
    pub fn fields(&self) -> &Metadata {
        &self.fields
    }

    /// Returns `true` if `requirement` is on the deny-list.
    #[must_use]
    pub fn is_denied(&self, requirement: &str) -> bool {
        self.denied.contains(requirement)
    }

    fn fields_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl Context for TracingContext {
    fn bind(self: Arc<Self>, metadata: Metadata) -> Result<SharedContext, ContextError> {
        let mut fields = self.fields.clone();
        fields.extend(metadata);
        Ok(Arc::new(Self {
            fields,
            denied: Arc::clone(&self.denied),
        }))
    }

    fn emit(&self, event: &str, payload: Metadata) {
        let payload = Value::Object(payload);
        let context = self.fields_value();
        tracing::info!(
            target: EVENTS_TARGET,
            event,
            payload = %payload,
            context = %context
        );
    }

    fn ensure(&self, requirement: &str, details: Metadata) -> Result<(), ContextError> {
        // Built outside the macros: their expansion shadows `Value`.
        let details = Value::Object(details);
        if self.is_denied(requirement) {
            let context = self.fields_value();
            tracing::warn!(
                target: EVENTS_TARGET,
                requirement,
                details = %details,
                context = %context,
                "requirement denied"
            );
            return Err(ContextError::requirement_failed(
                requirement,
                "denied by policy",
            ));
        }

        tracing::debug!(
            target: EVENTS_TARGET,
            requirement,
            details = %details,
            "requirement satisfied"
        );
        Ok(())
    }

    fn metadata(&self) -> Metadata {
        self.fields.clone()
    }
}
