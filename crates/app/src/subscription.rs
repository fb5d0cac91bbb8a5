//! Scoped gateway subscription.
//!
//! [`Subscription`] registers a listener on creation and removes it when
//! dropped. A torn-down device, including one dropped while unwinding, never
//! leaves a dangling callback in the gateway.

use std::sync::Arc;

use crate::ports::{Gateway, Listener, ListenerId};

/// Guard owning one listener registration.
pub struct Subscription<G: Gateway> {
    gateway: Arc<G>,
    id: ListenerId,
}

impl<G: Gateway> Subscription<G> {
    /// Register `listener` with `gateway`.
    pub fn attach(gateway: Arc<G>, listener: Listener) -> Self {
        let id = gateway.subscribe(listener);
        tracing::trace!(?id, "listener attached");
        Self { gateway, id }
    }
}

impl<G: Gateway> Drop for Subscription<G> {
    fn drop(&mut self) {
        self.gateway.unsubscribe(self.id);
        tracing::trace!(id = ?self.id, "listener detached");
    }
}
