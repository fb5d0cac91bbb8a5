//! # joinbridge-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** over the device registry
//!   (`/api/devices`, `/api/devices/{name}/services/{service}`)
//! - Stream state invalidations as **Server-Sent Events**
//!   (`/api/events/stream`) so clients know when to re-read a device
//! - Map application errors into HTTP status codes
//!
//! ## Dependency rule
//! Depends on `joinbridge-app` (for the registry and the gateway port) and
//! `joinbridge-domain` (for types used in response mapping). Never leaks axum
//! types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
