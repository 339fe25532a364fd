//! Single-target dispatch: resolve, bind, call.

use crate::binder::bind_parameters;
use crate::providers::EventFields;
use crate::resolver::HandlerResolver;
use relais_core::{
    DispatchError, Event, EventKind, HandlerCandidate, ResolveError, Subscriber, Value,
    ValueProvider,
};
use std::any::Any;
use std::sync::Arc;

/// Invokes one handler for one (target, event) pair.
///
/// The dispatcher owns its [`HandlerResolver`] and with it the resolution
/// cache; construct one per engine (or per test) rather than sharing a
/// global.
pub struct Dispatcher {
    resolver: HandlerResolver,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher with a cold resolution cache.
    pub fn new() -> Self {
        Self {
            resolver: HandlerResolver::new(),
        }
    }

    /// The resolver backing this dispatcher.
    pub fn resolver(&self) -> &HandlerResolver {
        &self.resolver
    }

    /// Resolve without invoking: a pure query, safe to call speculatively.
    pub fn resolve(
        &self,
        target: &dyn Subscriber,
        kind: &'static EventKind,
    ) -> Result<Option<Arc<HandlerCandidate>>, ResolveError> {
        self.resolver.resolve(target, kind)
    }

    /// Dispatch `event` to `target`, returning the handler's result
    /// downcast to `R`.
    ///
    /// "Nobody listens" is a normal outcome for an individual target: with
    /// no valid candidate (or a handler returning something other than an
    /// `R`) the default value for `R` is returned. Binding failures are
    /// fatal for the call.
    pub fn invoke<R>(
        &self,
        target: &dyn Subscriber,
        event: &dyn Event,
        providers: Option<&[&dyn ValueProvider]>,
    ) -> Result<R, DispatchError>
    where
        R: Any + Default + Send + Sync,
    {
        match self.invoke_raw(target, event, providers)? {
            Some(value) => Ok(value.try_take::<R>().unwrap_or_default()),
            None => Ok(R::default()),
        }
    }

    /// Dispatch `event` to `target`, returning the handler's type-erased
    /// result, or `None` when no handler resolved.
    ///
    /// When no provider list is supplied, the default is a single
    /// event-field provider over `event`.
    pub fn invoke_raw(
        &self,
        target: &dyn Subscriber,
        event: &dyn Event,
        providers: Option<&[&dyn ValueProvider]>,
    ) -> Result<Option<Value>, DispatchError> {
        let Some(candidate) = self.resolver.resolve(target, event.kind())? else {
            return Ok(None);
        };

        let fields = EventFields::new(event);
        let default_providers: &[&dyn ValueProvider] = &[&fields];
        let providers = providers.unwrap_or(default_providers);

        let args = bind_parameters(&candidate, event, providers)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            subscriber = candidate.target_name(),
            handler = candidate.name(),
            event = event.kind().name(),
            "invoking handler"
        );

        let any: &dyn Any = target;
        Ok(Some(candidate.call(any, &args)))
    }
}
