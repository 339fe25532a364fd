//! The priority-ordered multi-subscriber chain.

use crate::dispatcher::Dispatcher;
use crate::providers::EventFields;
use relais_core::{DispatchError, Event, InvocationStatus, Subscriber, ValueProvider};
use std::sync::{Arc, Mutex, PoisonError};

/// The priority assigned by [`PriorityChain::add`]: mid-range, so callers
/// can order themselves before or after the default population.
pub const DEFAULT_PRIORITY: u32 = 500;

struct ChainEntry {
    subscriber: Arc<dyn Subscriber>,
    priority: u32,
    seq: u64,
}

struct ChainState {
    entries: Vec<ChainEntry>,
    next_seq: u64,
}

/// An ordered registry of subscribed targets with interception semantics.
///
/// Entries execute in ascending priority; ties preserve first-added order.
/// [`PriorityChain::invoke`] drives the dispatcher over every entry,
/// OR-folding the SUCCESS/FAILURE bits of each reported status into the
/// aggregate and stopping early when a status carries an intercept bit.
///
/// Structural mutation (add/remove) is serialized by a single chain-wide
/// lock; dispatch itself runs on a snapshot outside the lock, so handlers
/// may add or remove subscriptions without deadlocking (taking effect from
/// the next `invoke`).
pub struct PriorityChain {
    state: Mutex<ChainState>,
    dispatcher: Dispatcher,
    external: Option<Arc<dyn ValueProvider>>,
}

impl Default for PriorityChain {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityChain {
    /// Create an empty chain with no external provider.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ChainState {
                entries: Vec::new(),
                next_seq: 0,
            }),
            dispatcher: Dispatcher::new(),
            external: None,
        }
    }

    /// Create an empty chain whose invocations expose `provider` as the
    /// external binding source (slot 1).
    pub fn with_external(provider: Arc<dyn ValueProvider>) -> Self {
        Self {
            external: Some(provider),
            ..Self::new()
        }
    }

    /// Subscribe `subscriber` at the default priority.
    pub fn add(&self, subscriber: Arc<dyn Subscriber>) {
        self.add_with_priority(subscriber, DEFAULT_PRIORITY);
    }

    /// Subscribe `subscriber` at an explicit priority. Lower priorities
    /// run first; equal priorities run in insertion order.
    pub fn add_with_priority(&self, subscriber: Arc<dyn Subscriber>, priority: u32) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = state.next_seq;
        state.next_seq += 1;
        // seq grows monotonically, so this insertion point keeps the
        // vector sorted by (priority, seq).
        let at = state
            .entries
            .partition_point(|entry| (entry.priority, entry.seq) <= (priority, seq));
        state.entries.insert(
            at,
            ChainEntry {
                subscriber,
                priority,
                seq,
            },
        );
    }

    /// Unsubscribe by identity. Removing a non-member returns `false`
    /// without side effects.
    pub fn remove(&self, subscriber: &Arc<dyn Subscriber>) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state
            .entries
            .iter()
            .position(|entry| Arc::ptr_eq(&entry.subscriber, subscriber))
        {
            Some(at) => {
                state.entries.remove(at);
                true
            }
            None => false,
        }
    }

    /// How many subscriptions the chain currently holds.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// Whether the chain has no subscriptions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch `event` through the chain in priority order.
    ///
    /// Resolution and binding errors propagate immediately and abort the
    /// remaining entries; no partial-failure isolation is provided at
    /// this layer.
    pub fn invoke(&self, event: &dyn Event) -> Result<InvocationStatus, DispatchError> {
        let snapshot: Vec<Arc<dyn Subscriber>> = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state
                .entries
                .iter()
                .map(|entry| Arc::clone(&entry.subscriber))
                .collect()
        };

        let fields = EventFields::new(event);
        let mut providers: Vec<&dyn ValueProvider> = vec![&fields];
        if let Some(external) = self.external.as_deref() {
            providers.push(external);
        }

        let mut aggregate = InvocationStatus::empty();
        for subscriber in snapshot {
            let status = match self
                .dispatcher
                .invoke_raw(subscriber.as_ref(), event, Some(&providers))?
            {
                Some(value) => InvocationStatus::coerce(&value),
                None => InvocationStatus::empty(),
            };
            aggregate |= status.outcome_bits();
            if status.intercepted() {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    subscriber = subscriber.target_name(),
                    event = event.kind().name(),
                    "event intercepted, stopping chain"
                );
                break;
            }
        }
        Ok(aggregate)
    }
}
