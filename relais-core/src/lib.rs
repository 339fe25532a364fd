//! # relais-core
//!
//! Core traits and data model for the Relais dispatch engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! code that authors events and handler tables without pulling in the full
//! `relais` engine.
//!
//! # The Dispatch Model
//!
//! Relais performs **in-process, runtime-resolved dispatch**: given an event
//! instance and an arbitrary target object, the engine decides at run time
//! which of the target's declared handler procedures receives the event,
//! sources that procedure's parameters from named value providers, and, for
//! multi-subscriber scenarios, walks a priority-ordered chain with
//! early-termination ("interception") semantics.
//!
//! The pieces defined here, leaves first:
//!
//! ## [`EventKind`] and [`Event`]
//!
//! Events form a family tree. Each event value reports its runtime
//! [`EventKind`], a `&'static` descriptor with an optional parent link.
//! "Supertype of" walks the parent chain and includes the kind itself.
//! Handlers declared for a broader kind can receive any narrower event.
//!
//! ## [`Value`] and [`ValueProvider`]
//!
//! Handler parameters are sourced from named key→value lookups. A provider
//! exposes one operation: `try_get(key, expected_type)`. Values are
//! type-erased and cheap to clone.
//!
//! ## [`HandlerDescriptor`], [`ParameterSpec`] and [`Subscriber`]
//!
//! A target type declares its handlers as a table of descriptors: a name,
//! an optional explicit event kind, an enable flag, an ordered parameter
//! list, and the procedure itself. The table is the authored registration
//! metadata the resolver scans once per target type.
//!
//! ## [`HandlerCandidate`]
//!
//! The resolved form of a descriptor: its event kind pinned down (declared
//! or inferred from a whole-event parameter) and ready to invoke.
//!
//! ## [`InvocationStatus`]
//!
//! The bit-set handlers report back through a chain: success/failure bits
//! are aggregated, intercept bits stop the walk.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Top-level error type (resolution or binding)
//! - [`ResolveError`] - Handler resolution failures
//! - [`BindError`] - Parameter binding failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod handler;
mod provider;
mod status;
mod value;

// Re-exports
pub use error::{BindError, DispatchError, ResolveError};
pub use event::{Event, EventKind};
pub use handler::{
    Arg, HandlerCandidate, HandlerDescriptor, HandlerFn, ParameterSource, ParameterSpec, Subscriber,
};
pub use provider::{Introspect, ValueProvider};
pub use status::InvocationStatus;
pub use value::{ExpectedType, Value};
