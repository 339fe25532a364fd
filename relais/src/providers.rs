//! Concrete binding sources.
//!
//! Three provider forms participate in parameter binding: event fields,
//! generic object properties, and a plain named-value map (the external/DI
//! style source). All three own their type check: a key holding a value of
//! the wrong type reports not-found.

use relais_core::{Event, ExpectedType, Introspect, Value, ValueProvider};
use std::collections::HashMap;

/// A provider over an event instance's named fields (lookup slot 0).
pub struct EventFields<'a> {
    event: &'a dyn Event,
}

impl<'a> EventFields<'a> {
    /// Wrap `event`'s fields as a binding source.
    pub fn new(event: &'a dyn Event) -> Self {
        Self { event }
    }
}

impl ValueProvider for EventFields<'_> {
    fn try_get(&self, key: &str, expected: ExpectedType) -> Option<Value> {
        self.event.field(key).filter(|value| value.matches(expected))
    }
}

/// A provider over a generic object's properties.
pub struct ObjectProperties<'a> {
    object: &'a dyn Introspect,
}

impl<'a> ObjectProperties<'a> {
    /// Wrap `object`'s properties as a binding source.
    pub fn new(object: &'a dyn Introspect) -> Self {
        Self { object }
    }
}

impl ValueProvider for ObjectProperties<'_> {
    fn try_get(&self, key: &str, expected: ExpectedType) -> Option<Value> {
        self.object
            .property(key)
            .filter(|value| value.matches(expected))
    }
}

/// A plain named-value source: the external/DI-style provider, and a
/// convenient way to hand ad-hoc values to a chain (lookup slot 1).
///
/// ```rust,ignore
/// let values = NamedValues::new()
///     .with("retries", 3u32)
///     .with("label", String::from("primary"));
/// ```
#[derive(Default, Clone)]
pub struct NamedValues {
    entries: HashMap<String, Value>,
}

impl NamedValues {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under `key`.
    pub fn insert<T: Send + Sync + 'static>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), Value::new(value));
    }

    /// Builder-style [`NamedValues::insert`].
    pub fn with<T: Send + Sync + 'static>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }
}

impl ValueProvider for NamedValues {
    fn try_get(&self, key: &str, expected: ExpectedType) -> Option<Value> {
        self.entries
            .get(key)
            .filter(|value| value.matches(expected))
            .cloned()
    }
}
