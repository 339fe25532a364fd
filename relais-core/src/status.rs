//! Invocation status flags.

use crate::value::Value;
use bitflags::bitflags;

bitflags! {
    /// The bit-set a handler invocation reports back through a chain.
    ///
    /// `SUCCESS` and `FAILURE` are outcome bits: the chain OR-folds them
    /// into its aggregate. `INTERCEPT` and `LOCAL_INTERCEPT` are control
    /// signals: either one stops the chain walk for the current event, and
    /// neither is accumulated into the aggregate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InvocationStatus: u8 {
        /// The handler processed the event.
        const SUCCESS = 1;
        /// The handler reports a failed outcome.
        const FAILURE = 1 << 1;
        /// Stop chain processing for this event.
        const INTERCEPT = 1 << 2;
        /// Stop processing within the current chain only.
        const LOCAL_INTERCEPT = 1 << 3;
    }
}

impl InvocationStatus {
    /// Whether either intercept bit is set.
    pub fn intercepted(&self) -> bool {
        self.intersects(Self::INTERCEPT | Self::LOCAL_INTERCEPT)
    }

    /// Just the SUCCESS/FAILURE bits, the part a chain aggregates.
    pub fn outcome_bits(&self) -> Self {
        *self & (Self::SUCCESS | Self::FAILURE)
    }

    /// Interpret a type-erased handler return as a status.
    ///
    /// - an `InvocationStatus` passes through unchanged
    /// - `bool` marks the event handled: `true` is SUCCESS + INTERCEPT
    ///   ("consumed, stop the chain"), `false` is plain SUCCESS
    /// - anything else counts as SUCCESS: the handler ran to completion
    ///
    /// Handlers signal a failed outcome by returning a status carrying
    /// `FAILURE`; panics propagate to the chain's caller uncaught.
    pub fn coerce(value: &Value) -> Self {
        if let Some(status) = value.downcast_ref::<InvocationStatus>() {
            return *status;
        }
        if let Some(handled) = value.downcast_ref::<bool>() {
            return if *handled {
                Self::SUCCESS | Self::INTERCEPT
            } else {
                Self::SUCCESS
            };
        }
        Self::SUCCESS
    }
}
