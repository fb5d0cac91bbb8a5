//! Shared application state for axum handlers.

use std::sync::Arc;

use joinbridge_app::ports::Gateway;
use joinbridge_app::services::device_registry::DeviceRegistry;

/// Application state shared across all axum handlers.
///
/// Generic over the gateway to avoid dynamic dispatch. `Clone` is implemented
/// manually so the gateway itself does not need to be `Clone`; only the `Arc`
/// is cloned.
pub struct AppState<G: Gateway> {
    pub registry: Arc<DeviceRegistry<G>>,
}

impl<G: Gateway> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<G: Gateway + 'static> AppState<G> {
    pub fn new(registry: DeviceRegistry<G>) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Use this when the registry is shared with other tasks.
    pub fn from_arc(registry: Arc<DeviceRegistry<G>>) -> Self {
        Self { registry }
    }
}
