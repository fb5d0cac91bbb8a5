//! # joinbridge-domain
//!
//! Pure domain model for translating a control processor's flat join space
//! into semantically typed devices.
//!
//! ## Responsibilities
//! - Foundational types: digital/analog join addresses, error conventions
//! - Define **device configurations** (role → join mappings, resolved once)
//! - Define **derived state** for every device kind (HVAC mode, cover motion,
//!   elevator position, brightness, …)
//! - Contain the pure resolvers and command planners: mode priority, HVAC
//!   action, cover motion, the elevator interlock
//! - Contain the scaling rules between raw analog values and displayed values
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or async runtimes.
//! Reading and writing joins is expressed as a trait in the `app` crate (port).

pub mod error;
pub mod join;
pub mod scaling;

pub mod capability;
pub mod device;
