//! Testing utilities for Relais.
//!
//! Handler procedures are closures buried in descriptor tables, so test
//! fixtures need a shared, cloneable place to record what ran and in what
//! order. [`CallLog`] is that spy.

use std::sync::{Arc, Mutex};

/// A shared recorder of invocation order.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let fixture = Fixture { log: log.clone() };
/// // ...dispatch...
/// assert_eq!(log.entries(), vec!["first", "second"]);
/// ```
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// A clone of the recorded entries, in order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// How many entries have been recorded.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all recorded entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let log = CallLog::new();
        assert!(log.is_empty());

        let clone = log.clone();
        clone.record("one");
        log.record("two");

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries(), vec!["one", "two"]);

        log.clear();
        assert!(clone.is_empty());
    }
}
