//! In-process bus announcing that a device's derived state must be re-read.

use serde::Serialize;
use tokio::sync::broadcast;

use joinbridge_domain::join::SignalChange;

/// A device's derived state may have changed.
///
/// Carries no state: subscribers read the device again to get it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateInvalidated {
    pub device: String,
    pub change: SignalChange,
}

/// Invalidation bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
#[derive(Clone)]
pub struct InvalidationBus {
    sender: broadcast::Sender<StateInvalidated>,
}

impl InvalidationBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to invalidations published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateInvalidated> {
        self.sender.subscribe()
    }

    /// Publish an invalidation to all current subscribers.
    pub fn publish(&self, event: StateInvalidated) {
        // Fails only when nobody listens.
        let _ = self.sender.send(event);
    }
}
