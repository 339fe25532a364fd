//! Error types for Relais.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Top-level error type for resolve/bind/invoke
//! - [`ResolveError`] - Handler resolution failures
//! - [`BindError`] - Parameter binding failures
//!
//! Absence of a handler is *not* an error: `resolve` reports it as a
//! first-class `None` result and callers decide whether that is fatal.

use thiserror::Error;

/// Top-level error type for dispatch operations.
///
/// Callers that want to treat resolution and binding failures uniformly
/// match on this; the leaf enums carry the diagnostics.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Handler resolution failed.
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolveError),

    /// Parameter binding failed.
    #[error("binding error: {0}")]
    Binding(#[from] BindError),
}

/// Errors raised while resolving a handler for an event kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Two valid candidates are mutually non-more-specific.
    #[error(
        "ambiguous handlers on `{target}` for event `{event}`: \
         `{first}` and `{second}` are equally specific"
    )]
    AmbiguousHandler {
        /// The target type under resolution.
        target: &'static str,
        /// The actual event kind being dispatched.
        event: &'static str,
        /// The first conflicting candidate.
        first: &'static str,
        /// The second conflicting candidate.
        second: &'static str,
    },

    /// A single candidate declares more than one whole-event parameter, so
    /// its event kind cannot be inferred.
    #[error(
        "handler `{handler}` on `{target}` declares {count} event parameters; \
         its event kind cannot be inferred"
    )]
    AmbiguousEventParameter {
        /// The target type under resolution.
        target: &'static str,
        /// The offending handler.
        handler: &'static str,
        /// How many whole-event parameters it declares.
        count: usize,
    },

    /// A candidate declares no event kind and none can be inferred.
    #[error("handler `{handler}` on `{target}` declares no event kind and none can be inferred")]
    UnknownEventKind {
        /// The target type under resolution.
        target: &'static str,
        /// The offending handler.
        handler: &'static str,
    },
}

/// Errors raised while binding a resolved handler's parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A required parameter could not be sourced from any provider.
    #[error(
        "required parameter `{parameter}` of handler `{handler}` on `{target}` \
         could not be sourced from any provider"
    )]
    ParameterBindingFailed {
        /// The target type owning the handler.
        target: &'static str,
        /// The owning handler.
        handler: &'static str,
        /// The unbindable parameter.
        parameter: &'static str,
    },
}
