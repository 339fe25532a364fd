//! Value-provider and introspection seams.
//!
//! A [`ValueProvider`] is the interface any external value source (a DI
//! container, a config tree, a plain object) implements to participate as
//! a parameter-binding source. The engine ships concrete providers over
//! event fields, object properties and named-value maps; this module only
//! defines the seams.

use crate::value::{ExpectedType, Value};

/// A named key→value lookup consulted during parameter binding.
///
/// Implementations own the type check: a key that is present but holds a
/// value of the wrong type is reported as not found.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot act as a binding source",
    label = "missing `ValueProvider` implementation",
    note = "Implement `try_get` to participate in parameter binding."
)]
pub trait ValueProvider: Send + Sync {
    /// Look up `key`, returning its value only if present with the
    /// expected type.
    fn try_get(&self, key: &str, expected: ExpectedType) -> Option<Value>;
}

/// A property bag: the capability a generic object implements so its
/// properties can be wrapped as a binding source.
pub trait Introspect: Send + Sync {
    /// Look up a named property.
    fn property(&self, name: &str) -> Option<Value>;
}
