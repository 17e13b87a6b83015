use std::sync::Mutex;
use tracing::warn;

/// Append-only, lock-guarded collection of "not processed" messages.
///
/// Every stage of a run records its non-fatal failures here instead of
/// aborting: unreadable directories, unopenable files, undecodable
/// contents. In concurrent mode the collection is written from many scan
/// workers at once, so all access goes through the mutex. The accumulated
/// messages are surfaced once, after normal output.
#[derive(Debug, Default)]
pub struct Diagnostics {
    messages: Mutex<Vec<String>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one message, preserving insertion order.
    pub fn record(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.messages
            .lock()
            .expect("diagnostics mutex poisoned")
            .push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .expect("diagnostics mutex poisoned")
            .is_empty()
    }

    /// Snapshot of everything recorded so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("diagnostics mutex poisoned")
            .clone()
    }
}
