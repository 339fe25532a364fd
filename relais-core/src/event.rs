//! Event kinds and the event capability trait.
//!
//! Rust has no runtime type hierarchy, so the event family is authored
//! explicitly: each event type names a `&'static` [`EventKind`] descriptor,
//! and kinds link to an optional parent. Specificity and validity checks in
//! the resolver are walks over this tree.

use crate::value::Value;
use std::any::Any;

/// A node in the event-family tree.
///
/// Kinds are plain statics; identity is pointer identity. Construction is
/// `const` so a kind tree is just a set of `static` items:
///
/// ```rust,ignore
/// static APP: EventKind = EventKind::root("AppEvent");
/// static INPUT: EventKind = EventKind::sub("InputEvent", &APP);
/// static CLICK: EventKind = EventKind::sub("ClickEvent", &INPUT);
/// ```
pub struct EventKind {
    name: &'static str,
    parent: Option<&'static EventKind>,
}

impl EventKind {
    /// Create a root kind with no parent.
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Create a kind below `parent` in the family tree.
    pub const fn sub(name: &'static str, parent: &'static EventKind) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// The diagnostic name of this kind.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The parent kind, if any.
    pub fn parent(&self) -> Option<&'static EventKind> {
        self.parent
    }

    /// Whether this kind is a supertype of `other`.
    ///
    /// Reflexive: every kind is a supertype of itself. A handler declared
    /// for a supertype kind can safely receive the narrower event.
    pub fn is_supertype_of(&self, other: &EventKind) -> bool {
        let mut current = Some(other);
        while let Some(kind) = current {
            if std::ptr::eq(self, kind) {
                return true;
            }
            current = kind.parent;
        }
        false
    }
}

impl std::fmt::Debug for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventKind")
            .field("name", &self.name)
            .field("parent", &self.parent.map(EventKind::name))
            .finish()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// The capability every dispatchable event implements.
///
/// An event reports its runtime [`EventKind`] and may expose named fields
/// for parameter binding. Field lookup defaults to "no fields"; events that
/// want their fields bindable override [`Event::field`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatchable event",
    label = "missing `Event` implementation",
    note = "Implement `Event` and report a `&'static EventKind` from `kind()`."
)]
pub trait Event: Any + Send + Sync {
    /// The runtime kind of this event instance.
    fn kind(&self) -> &'static EventKind;

    /// Look up a named field on this event, for parameter binding.
    fn field(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }
}
