//! # joinbridge-app
//!
//! Application layer — translators and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the [`Gateway`](ports::Gateway) port that owns the join space
//! - Provide the signal helpers every translator writes through: optional
//!   roles, fixed-width pulses, pulsed-or-maintained levels
//! - Provide the transition engine that ramps analog joins for dimmers
//! - Implement one translator per device kind (climate, cover, elevator,
//!   light, switch, media player, button) behind per-kind capability traits
//! - Provide the [`DeviceRegistry`](services::device_registry::DeviceRegistry)
//!   that builds translators from configuration and dispatches service calls
//! - Relay gateway pushes as state invalidations on an in-process bus
//!
//! ## Dependency rule
//! Depends on `joinbridge-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod capabilities;
pub mod devices;
pub mod event_bus;
pub mod ports;
pub mod services;
pub mod signal;
pub mod subscription;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;
