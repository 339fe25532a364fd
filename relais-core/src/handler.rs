//! Handler registration metadata, resolved candidates and the target
//! capability.
//!
//! A target type declares its handlers as a table of [`HandlerDescriptor`]s:
//! authored registration metadata the resolver scans once per target
//! type. Descriptors wrap a typed closure over the concrete target into a
//! type-erased thunk, the same move the framework makes everywhere a typed
//! surface has to live in a runtime registry.

use crate::event::{Event, EventKind};
use crate::value::{ExpectedType, Value};
use std::any::Any;
use std::sync::Arc;

/// Where a parameter's value comes from.
///
/// The three binding strategies are exhaustive and pattern-matchable;
/// lookups name the provider slot they resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSource {
    /// The event instance itself is the argument; no provider lookup.
    InjectWhole,
    /// Looked up by key on the event-field provider (slot 0).
    LookupNamed(&'static str),
    /// Looked up by key on the external provider (slot 1).
    LookupExternal(&'static str),
}

/// One formal parameter of a handler: its source, expected type, and
/// required/default disposition.
///
/// Parameters are required by default; attaching a default via
/// [`ParameterSpec::with_default`] makes them optional. [`ParameterSpec::require`]
/// is the override that forces a parameter back to required even with a
/// default present.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    name: &'static str,
    source: ParameterSource,
    expected: Option<ExpectedType>,
    event_kind: Option<&'static EventKind>,
    required: bool,
    default: Option<Value>,
}

impl ParameterSpec {
    /// A whole-event parameter: the argument is the event instance itself.
    ///
    /// The kind doubles as the parameter's expected type; a descriptor with
    /// no explicit event kind infers its kind from this parameter.
    pub fn event(kind: &'static EventKind) -> Self {
        Self {
            name: kind.name(),
            source: ParameterSource::InjectWhole,
            expected: None,
            event_kind: Some(kind),
            required: true,
            default: None,
        }
    }

    /// A parameter sourced from the event-field provider under `name`.
    pub fn named<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            source: ParameterSource::LookupNamed(name),
            expected: Some(ExpectedType::of::<T>()),
            event_kind: None,
            required: true,
            default: None,
        }
    }

    /// A parameter sourced from the external provider under `name`.
    pub fn external<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            source: ParameterSource::LookupExternal(name),
            expected: Some(ExpectedType::of::<T>()),
            event_kind: None,
            required: true,
            default: None,
        }
    }

    /// Attach a default value, making the parameter optional.
    pub fn with_default(mut self, value: Value) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    /// Force the parameter back to required.
    pub fn require(mut self) -> Self {
        self.required = true;
        self
    }

    /// The parameter's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The parameter's source.
    pub fn source(&self) -> ParameterSource {
        self.source
    }

    /// The expected value type, for lookup parameters.
    pub fn expected(&self) -> Option<ExpectedType> {
        self.expected
    }

    /// The expected event kind, for whole-event parameters.
    pub fn event_kind(&self) -> Option<&'static EventKind> {
        self.event_kind
    }

    /// Whether binding fails when no provider supplies this parameter.
    pub fn required(&self) -> bool {
        self.required
    }

    /// The default value used when the parameter is optional and unsourced.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// One bound argument handed to a handler procedure: either the borrowed
/// event instance or an owned, provider-sourced value.
pub enum Arg<'a> {
    /// The event instance (whole-event injection).
    Event(&'a dyn Event),
    /// A value sourced from a provider or a parameter default.
    Value(Value),
}

impl<'a> Arg<'a> {
    /// The event instance, if this argument is one.
    pub fn as_event(&self) -> Option<&'a dyn Event> {
        match self {
            Arg::Event(event) => Some(*event),
            Arg::Value(_) => None,
        }
    }

    /// The event instance downcast to a concrete event type.
    pub fn event<T: Event>(&self) -> Option<&'a T> {
        let event = self.as_event()?;
        let any: &'a dyn Any = event;
        any.downcast_ref::<T>()
    }

    /// The sourced value downcast to `T`.
    pub fn value<T: Any>(&self) -> Option<&T> {
        match self {
            Arg::Event(_) => None,
            Arg::Value(value) => value.downcast_ref::<T>(),
        }
    }
}

/// The type-erased handler procedure: target, bound arguments, erased
/// return value.
pub type HandlerFn = Arc<dyn for<'a> Fn(&'a dyn Any, &'a [Arg<'a>]) -> Value + Send + Sync>;

/// Authored registration metadata for one handler procedure on a target
/// type.
///
/// Built in consuming-builder style:
///
/// ```rust,ignore
/// HandlerDescriptor::new("on_click", |w: &Widget, args: &[Arg<'_>]| { ... })
///     .on(&CLICK)
///     .param(ParameterSpec::event(&CLICK))
///     .param(ParameterSpec::named::<i32>("x"))
/// ```
///
/// The event kind may be declared explicitly with [`HandlerDescriptor::on`];
/// otherwise the resolver infers it from the single whole-event parameter.
#[derive(Clone)]
pub struct HandlerDescriptor {
    name: &'static str,
    event_kind: Option<&'static EventKind>,
    enabled: bool,
    params: Vec<ParameterSpec>,
    invoke: HandlerFn,
}

impl HandlerDescriptor {
    /// Wrap a typed handler procedure over the concrete target type `T`.
    ///
    /// The return value is type-erased; chains interpret it through
    /// [`InvocationStatus::coerce`](crate::InvocationStatus::coerce).
    pub fn new<T, R, F>(name: &'static str, body: F) -> Self
    where
        T: Any,
        R: Any + Send + Sync,
        F: Fn(&T, &[Arg<'_>]) -> R + Send + Sync + 'static,
    {
        let invoke: HandlerFn = Arc::new(move |target: &dyn Any, args: &[Arg<'_>]| {
            let Some(target) = target.downcast_ref::<T>() else {
                // The resolver only pairs a table with its own target type.
                unreachable!("handler `{name}` invoked against a foreign target type");
            };
            Value::new(body(target, args))
        });
        Self {
            name,
            event_kind: None,
            enabled: true,
            params: Vec::new(),
            invoke,
        }
    }

    /// Declare the handled event kind explicitly.
    pub fn on(mut self, kind: &'static EventKind) -> Self {
        self.event_kind = Some(kind);
        self
    }

    /// Append a parameter, in declaration order.
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Mark this descriptor disabled; the resolver skips it during scans.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The handler's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The explicitly declared event kind, if any.
    pub fn declared_kind(&self) -> Option<&'static EventKind> {
        self.event_kind
    }

    /// Whether the resolver considers this descriptor at all.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The ordered parameter list.
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Pin this descriptor to its resolved event kind, producing the
    /// candidate form the resolver caches.
    pub fn into_candidate(
        self,
        target_name: &'static str,
        event_kind: &'static EventKind,
    ) -> HandlerCandidate {
        HandlerCandidate {
            target_name,
            name: self.name,
            event_kind,
            params: self.params,
            invoke: self.invoke,
        }
    }
}

impl std::fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("name", &self.name)
            .field("event_kind", &self.event_kind.map(EventKind::name))
            .field("enabled", &self.enabled)
            .field("params", &self.params.len())
            .finish()
    }
}

/// A resolved handler: descriptor data plus the resolved event kind and the
/// owning target's name. Immutable once built; shared out of the resolution
/// cache via `Arc`.
#[derive(Clone)]
pub struct HandlerCandidate {
    target_name: &'static str,
    name: &'static str,
    event_kind: &'static EventKind,
    params: Vec<ParameterSpec>,
    invoke: HandlerFn,
}

impl HandlerCandidate {
    /// The name of the target type declaring this handler.
    pub fn target_name(&self) -> &'static str {
        self.target_name
    }

    /// The handler's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared-or-inferred event kind this handler receives.
    pub fn event_kind(&self) -> &'static EventKind {
        self.event_kind
    }

    /// The ordered parameter list.
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Invoke the handler procedure with bound arguments.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not the concrete type this handler was
    /// declared on. The resolver only ever pairs a candidate with its
    /// own target type, so the panic signals direct misuse of `call`.
    pub fn call(&self, target: &dyn Any, args: &[Arg<'_>]) -> Value {
        (self.invoke)(target, args)
    }
}

impl std::fmt::Debug for HandlerCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerCandidate")
            .field("target", &self.target_name)
            .field("name", &self.name)
            .field("event_kind", &self.event_kind.name())
            .finish()
    }
}

/// The target-object capability: a type that declares a handler table.
///
/// The resolver calls [`Subscriber::handler_table`] only on cache misses,
/// the one-time scan per (target type, event kind) pair. Handler sets on a
/// type are not expected to change at run time.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot receive dispatched events",
    label = "missing `Subscriber` implementation",
    note = "Implement `handler_table` to declare this type's handlers."
)]
pub trait Subscriber: Any + Send + Sync {
    /// The handler table declared by this type.
    fn handler_table(&self) -> Vec<HandlerDescriptor>;

    /// Diagnostic name for this target type.
    fn target_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PING: EventKind = EventKind::root("Ping");

    struct Ping;

    impl Event for Ping {
        fn kind(&self) -> &'static EventKind {
            &PING
        }
    }

    struct Target {
        base: u32,
    }

    #[test]
    fn descriptor_wraps_a_typed_procedure() {
        let descriptor = HandlerDescriptor::new("sum", |t: &Target, args: &[Arg<'_>]| {
            t.base + args[0].value::<u32>().copied().unwrap_or(0)
        })
        .on(&PING)
        .param(ParameterSpec::named::<u32>("amount"));

        assert!(descriptor.enabled());
        assert_eq!(descriptor.params().len(), 1);

        let candidate = descriptor.into_candidate("Target", &PING);
        let target = Target { base: 40 };
        let args = [Arg::Value(Value::new(2u32))];
        let out = candidate.call(&target, &args);
        assert_eq!(out.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    #[should_panic(expected = "foreign target type")]
    fn calling_with_a_foreign_target_panics() {
        let candidate = HandlerDescriptor::new("noop", |_: &Target, _: &[Arg<'_>]| ())
            .on(&PING)
            .into_candidate("Target", &PING);
        let wrong = Ping;
        candidate.call(&wrong, &[]);
    }

    #[test]
    fn arg_accessors_distinguish_event_and_value() {
        let ping = Ping;
        let event_arg = Arg::Event(&ping);
        assert!(event_arg.as_event().is_some());
        assert!(event_arg.event::<Ping>().is_some());
        assert!(event_arg.value::<u32>().is_none());

        let value_arg = Arg::Value(Value::new(5u8));
        assert!(value_arg.as_event().is_none());
        assert_eq!(value_arg.value::<u8>(), Some(&5));
    }

    #[test]
    fn defaults_flip_required_off() {
        let spec = ParameterSpec::named::<bool>("flag");
        assert!(spec.required());
        let spec = spec.with_default(Value::new(false));
        assert!(!spec.required());
        assert!(spec.default().is_some());
        assert!(spec.require().required());
    }
}
