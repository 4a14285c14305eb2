//! The fallback [`NullContext`].

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::context::{Context, Metadata, SharedContext};
use crate::error::ContextError;

/// Metadata key under which emitted events are recorded.
const EVENTS_KEY: &str = "events";
/// Metadata key under which checked requirements are recorded.
const REQUIREMENTS_KEY: &str = "requirements";

/// Fallback context used when a call supplies no context of its own.
///
/// All state lives in a single metadata map:
///
/// - [`bind`](Context::bind) merges keys into the map and returns the same instance
/// - [`emit`](Context::emit) appends `[event, payload]` under `"events"`
/// - [`ensure`](Context::ensure) appends `[requirement, details]` under
///   `"requirements"` and always succeeds
///
/// The map sits behind a mutex so a shared `NullContext` stays sound across
/// threads, but concurrent calls sharing one instance still interleave their
/// records in arbitrary order.
#[derive(Debug, Default)]
pub struct NullContext {
    metadata: Mutex<Metadata>,
}

impl NullContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context pre-populated with `metadata`.
    #[must_use]
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata: Mutex::new(metadata),
        }
    }

    /// Creates an empty context behind a [`SharedContext`] handle.
    #[must_use]
    pub fn shared() -> SharedContext {
        Arc::new(Self::new())
    }

    /// Returns a copy of the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.metadata.lock().get(key).cloned()
    }

    /// Returns the events emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<(String, Metadata)> {
        self.records(EVENTS_KEY)
    }

    /// Returns the requirements checked so far, oldest first.
    #[must_use]
    pub fn requirements(&self) -> Vec<(String, Metadata)> {
        self.records(REQUIREMENTS_KEY)
    }

    fn record(&self, key: &str, name: &str, payload: Metadata) {
        let entry = Value::Array(vec![Value::String(name.to_owned()), Value::Object(payload)]);
        let mut metadata = self.metadata.lock();
        let slot = metadata
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()));
        // A caller may have bound a scalar under a reserved key.
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(entries) = slot {
            entries.push(entry);
        }
    }

    fn records(&self, key: &str) -> Vec<(String, Metadata)> {
        let metadata = self.metadata.lock();
        let Some(Value::Array(entries)) = metadata.get(key) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| match entry.as_array()?.as_slice() {
                [Value::String(name), Value::Object(payload)] => {
                    Some((name.clone(), payload.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

impl Context for NullContext {
    fn bind(self: Arc<Self>, metadata: Metadata) -> Result<SharedContext, ContextError> {
        self.metadata.lock().extend(metadata);
        Ok(self)
    }

    fn emit(&self, event: &str, payload: Metadata) {
        self.record(EVENTS_KEY, event, payload);
    }

    fn ensure(&self, requirement: &str, details: Metadata) -> Result<(), ContextError> {
        self.record(REQUIREMENTS_KEY, requirement, details);
        Ok(())
    }

    fn metadata(&self) -> Metadata {
        self.metadata.lock().clone()
    }
}
