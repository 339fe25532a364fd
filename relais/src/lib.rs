//! # relais - Loosely-Coupled Event Dispatch
//!
//! `relais` resolves, binds and invokes handler procedures at run time:
//! given an event instance and an arbitrary target object, it determines
//! which of the target's declared handlers should process the event, sources
//! the handler's parameters from named value providers, and, for
//! multi-subscriber scenarios, walks a priority-ordered chain with
//! early-termination ("interception") semantics.
//!
//! The control flow, outermost first:
//!
//! ```text
//! PriorityChain::invoke(event)
//!   └─ for each entry in ascending (priority, insertion order)
//!        └─ Dispatcher::invoke(target, event)
//!             ├─ HandlerResolver::resolve(target type, event kind)   [cached]
//!             ├─ bind_parameters(candidate, event, providers)
//!             └─ handler procedure call
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relais::{Dispatcher, EventKind, HandlerDescriptor, ParameterSpec};
//!
//! static CLICK: EventKind = EventKind::root("ClickEvent");
//!
//! struct Widget;
//! impl relais::Subscriber for Widget {
//!     fn handler_table(&self) -> Vec<HandlerDescriptor> {
//!         vec![
//!             HandlerDescriptor::new("on_click", |_w: &Widget, args| { ... })
//!                 .param(ParameterSpec::event(&CLICK)),
//!         ]
//!     }
//! }
//!
//! let dispatcher = Dispatcher::new();
//! let handled: bool = dispatcher.invoke(&Widget, &click_event, None)?;
//! ```
//!
//! Resolution is cached per (target type, event kind) pair: only the first
//! dispatch for a pair pays the scan cost.

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

mod binder;
mod chain;
mod dispatcher;
mod providers;
mod resolver;
mod specificity;
pub mod testing;

// Re-export the core data model alongside the engine.
pub use relais_core::{
    // Bound arguments
    Arg,
    // Error types
    BindError,
    DispatchError,
    // Events
    Event,
    EventKind,
    ExpectedType,
    // Handler metadata
    HandlerCandidate,
    HandlerDescriptor,
    HandlerFn,
    Introspect,
    // Status
    InvocationStatus,
    ParameterSource,
    ParameterSpec,
    ResolveError,
    Subscriber,
    // Values and providers
    Value,
    ValueProvider,
};

pub use binder::bind_parameters;
pub use chain::{DEFAULT_PRIORITY, PriorityChain};
pub use dispatcher::Dispatcher;
pub use providers::{EventFields, NamedValues, ObjectProperties};
pub use resolver::HandlerResolver;
pub use specificity::{Specificity, compare};

/// Prelude module - common imports for Relais.
///
/// # Usage
///
/// ```rust,ignore
/// use relais::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Arg, DispatchError, Dispatcher, Event, EventKind, HandlerDescriptor, InvocationStatus,
        ParameterSpec, PriorityChain, Subscriber, Value, ValueProvider,
    };
}
