//! Type-erased values and the expected-type check providers perform.

use std::any::{Any, TypeId};
use std::sync::Arc;

/// A type-erased, cheaply cloneable value.
///
/// `Value` wraps its payload in an `Arc`, so cloning only bumps a reference
/// count. The payload's type name is captured at construction for
/// diagnostics, since `dyn Any` alone cannot report it.
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wrap `value`.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The name of the wrapped type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_ref().type_id() == TypeId::of::<T>()
    }

    /// Whether the wrapped value satisfies `expected`.
    pub fn matches(&self, expected: ExpectedType) -> bool {
        self.inner.as_ref().type_id() == expected.id
    }

    /// Borrow the wrapped value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Move the wrapped value out, if this is the sole owner and the type
    /// matches. Returns `Err(self)` otherwise.
    pub fn try_take<T: Any + Send + Sync>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        match self.inner.downcast::<T>() {
            Ok(arc) => Arc::try_unwrap(arc).map_err(|arc| Self {
                inner: arc,
                type_name,
            }),
            Err(inner) => Err(Self { inner, type_name }),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name)
            .finish()
    }
}

/// The type a parameter or lookup expects, carried as a `TypeId` plus a
/// name for error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpectedType {
    id: TypeId,
    name: &'static str,
}

impl ExpectedType {
    /// The expected type for a `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}
