//! Handler resolution with a write-once read-through cache.

use crate::specificity::{Specificity, compare};
use relais_core::{
    EventKind, HandlerCandidate, HandlerDescriptor, ParameterSource, ResolveError, Subscriber,
};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Cache key half for an event kind: kinds are statics, so their address is
/// their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KindKey(usize);

impl KindKey {
    fn of(kind: &'static EventKind) -> Self {
        Self(kind as *const EventKind as usize)
    }
}

type CacheKey = (TypeId, KindKey);

/// Either the unique best handler for a (target type, event kind) pair, or
/// `None`, the first-class "nobody listens" marker. Both outcomes are
/// cached.
type Resolution = Option<Arc<HandlerCandidate>>;

/// Resolves the unique most-specific handler a target type declares for an
/// event kind.
///
/// The first resolution for a pair scans the target's handler table; the
/// result (a candidate or the no-handler marker) is published into a
/// read-mostly cache and never invalidated. Concurrent racers may compute
/// redundantly; the first to publish wins and the others adopt its entry.
///
/// Resolution *errors* (ambiguity, uninferable kinds) are not cached; they
/// are recomputed per call and deterministic.
pub struct HandlerResolver {
    cache: RwLock<HashMap<CacheKey, Resolution>>,
}

impl Default for HandlerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerResolver {
    /// Create a resolver with an empty cache.
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the handler `target`'s type declares for `kind`.
    ///
    /// Pure query: safe to call speculatively. `Ok(None)` means no valid
    /// candidate exists; callers decide whether that is fatal.
    pub fn resolve(
        &self,
        target: &dyn Subscriber,
        kind: &'static EventKind,
    ) -> Result<Resolution, ResolveError> {
        let any: &dyn Any = target;
        let key = (any.type_id(), KindKey::of(kind));

        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(cached.clone());
        }

        let computed = self.scan(target, kind)?;

        // Publish-if-absent: on a race the first writer wins and this
        // thread's computation is discarded.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(key).or_insert(computed).clone())
    }

    /// How many (target type, event kind) pairs have been resolved.
    pub fn cache_size(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The uncached resolution: scan the handler table, pin down each
    /// candidate's event kind, filter for validity, then keep only the
    /// maximally specific candidates.
    fn scan(
        &self,
        target: &dyn Subscriber,
        kind: &'static EventKind,
    ) -> Result<Resolution, ResolveError> {
        let target_name = target.target_name();
        let table = target.handler_table();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            subscriber = target_name,
            event = kind.name(),
            handlers = table.len(),
            "scanning handler table"
        );

        let mut maximal: Vec<(HandlerDescriptor, &'static EventKind)> = Vec::new();
        for descriptor in table {
            if !descriptor.enabled() {
                continue;
            }
            // Kind inference errors are raised even if the candidate would
            // not be valid for this event.
            let candidate_kind = resolved_kind(target_name, &descriptor)?;
            if !candidate_kind.is_supertype_of(kind) {
                continue;
            }
            // Maximal-set insertion under the specificity partial order.
            maximal.retain(|&(_, kept)| {
                !matches!(compare(candidate_kind, kept), Specificity::MoreSpecific)
            });
            let beaten = maximal
                .iter()
                .any(|&(_, kept)| matches!(compare(kept, candidate_kind), Specificity::MoreSpecific));
            if beaten {
                continue;
            }
            maximal.push((descriptor, candidate_kind));
        }

        match maximal.len() {
            0 => Ok(None),
            1 => {
                let (descriptor, candidate_kind) = maximal.remove(0);
                Ok(Some(Arc::new(
                    descriptor.into_candidate(target_name, candidate_kind),
                )))
            }
            _ => Err(ResolveError::AmbiguousHandler {
                target: target_name,
                event: kind.name(),
                first: maximal[0].0.name(),
                second: maximal[1].0.name(),
            }),
        }
    }
}

/// A candidate's event kind: explicit registration metadata, or inferred
/// from its single whole-event parameter.
fn resolved_kind(
    target_name: &'static str,
    descriptor: &HandlerDescriptor,
) -> Result<&'static EventKind, ResolveError> {
    if let Some(declared) = descriptor.declared_kind() {
        return Ok(declared);
    }
    let mut whole_event = descriptor
        .params()
        .iter()
        .filter(|spec| spec.source() == ParameterSource::InjectWhole);
    let first = whole_event.next();
    if whole_event.next().is_some() {
        let count = 2 + whole_event.count();
        return Err(ResolveError::AmbiguousEventParameter {
            target: target_name,
            handler: descriptor.name(),
            count,
        });
    }
    first
        .and_then(|spec| spec.event_kind())
        .ok_or(ResolveError::UnknownEventKind {
            target: target_name,
            handler: descriptor.name(),
        })
}
