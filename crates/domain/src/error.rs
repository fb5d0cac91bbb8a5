//! Common error types used across the workspace.
//!
//! Each failure class has its own typed error and converts into
//! [`BridgeError`] via `#[from]`, so callers match on the category and the
//! detail stays available through `source()`.

/// Top-level error for every fallible operation in joinbridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A role the requested capability depends on has no join.
    #[error("configuration incomplete")]
    ConfigurationIncomplete(#[from] MissingRoleError),

    /// The gateway reports no live connection to the control processor.
    #[error("gateway unavailable")]
    GatewayUnavailable,

    /// A command argument was rejected before any join was written.
    #[error("invalid command argument")]
    InvalidArgument(#[from] InvalidArgumentError),

    /// The referenced device does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A device configuration violates a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),
}

/// A capability was requested from a device whose configuration lacks the
/// join that backs it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device {device} has no join configured for {role}")]
pub struct MissingRoleError {
    /// Name of the device.
    pub device: String,
    /// Semantic role that is unconfigured (e.g. `"position"`).
    pub role: &'static str,
}

/// A referenced item does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of item that was looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// Identifier used for the lookup.
    pub id: String,
}

/// Reasons a command argument is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidArgumentError {
    /// A numeric argument falls outside its accepted range.
    #[error("{argument} must be between {min} and {max}, got {value}")]
    OutOfRange {
        argument: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A required argument was not supplied.
    #[error("missing argument {0}")]
    Missing(&'static str),

    /// An argument has the wrong JSON type.
    #[error("{argument} must be {expected}")]
    WrongType {
        argument: &'static str,
        expected: &'static str,
    },

    /// The requested source name is not in the device's source table.
    #[error("unknown source {0}")]
    UnknownSource(String),

    /// The requested mode is not one the device supports.
    #[error("unsupported mode {0}")]
    UnsupportedMode(String),

    /// The service name is not handled by this kind of device.
    #[error("unknown service {0}")]
    UnknownService(String),
}

/// Configuration-time domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A device name was empty.
    #[error("device name must not be empty")]
    EmptyName,

    /// Two devices share the same name.
    #[error("duplicate device name {0}")]
    DuplicateName(String),

    /// A setpoint divisor of zero was configured.
    #[error("divisor must be a positive integer")]
    ZeroDivisor,
}

impl InvalidArgumentError {
    /// Reject `value` unless it lies in `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::OutOfRange`] when the value is outside
    /// the range or not a number.
    pub fn check_range(
        argument: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<f64, Self> {
        if value.is_nan() || value < min || value > max {
            return Err(Self::OutOfRange {
                argument,
                value,
                min,
                max,
            });
        }
        Ok(value)
    }
}
