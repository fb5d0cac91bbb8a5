//! Conversions between raw analog join values and the values devices expose.
//!
//! Every conversion that accepts a caller-supplied value validates it before
//! producing a raw value, so a rejected command never reaches a join.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgumentError, ValidationError};

/// Full scale of an analog join.
pub const ANALOG_MAX: u16 = u16::MAX;

/// Raw units per percent when reading a cover position.
pub const POSITION_READ_SCALE: f64 = 655.35;

/// Raw units per percent when writing a cover position.
///
/// Deliberately not [`POSITION_READ_SCALE`]: writes truncate to whole units,
/// so a written position reads back slightly lower.
pub const POSITION_WRITE_SCALE: u16 = 655;

/// Raw units per brightness step on the 0–255 scale.
pub const BRIGHTNESS_SCALE: u16 = 255;

/// Cover position in percent (0 closed, 100 open) for a raw analog value.
#[must_use]
pub fn position_from_raw(raw: u16) -> f64 {
    f64::from(raw) / POSITION_READ_SCALE
}

/// Raw analog value for a requested cover position in percent.
///
/// The percentage is truncated to a whole number before scaling.
///
/// # Errors
///
/// Returns [`InvalidArgumentError::OutOfRange`] unless `percent` is in `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn position_to_raw(percent: f64) -> Result<u16, InvalidArgumentError> {
    let percent = InvalidArgumentError::check_range("position", percent, 0.0, 100.0)?;
    Ok(percent as u16 * POSITION_WRITE_SCALE)
}

/// Brightness on the 0–255 scale for a raw analog value.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn brightness_from_raw(raw: u16) -> u8 {
    (raw / BRIGHTNESS_SCALE).min(255) as u8
}

/// Raw analog value for a brightness on the 0–255 scale.
#[must_use]
pub fn brightness_to_raw(brightness: u8) -> u16 {
    u16::from(brightness) * BRIGHTNESS_SCALE
}

/// Volume level in `0.0..=1.0` for a raw analog value.
#[must_use]
pub fn volume_from_raw(raw: u16) -> f64 {
    f64::from(raw) / f64::from(ANALOG_MAX)
}

/// Raw analog value for a volume level, rounding up.
///
/// # Errors
///
/// Returns [`InvalidArgumentError::OutOfRange`] unless `level` is in `0.0..=1.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn volume_to_raw(level: f64) -> Result<u16, InvalidArgumentError> {
    let level = InvalidArgumentError::check_range("volume", level, 0.0, 1.0)?;
    Ok((level * f64::from(ANALOG_MAX)).ceil() as u16)
}

/// Positive integer divisor between a raw setpoint and its displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Divisor(u16);

impl Default for Divisor {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u16> for Divisor {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ValidationError::ZeroDivisor);
        }
        Ok(Self(value))
    }
}

impl From<Divisor> for u16 {
    fn from(divisor: Divisor) -> Self {
        divisor.0
    }
}

impl Divisor {
    /// Displayed value for a raw analog value (`raw / divisor`).
    #[must_use]
    pub fn to_display(self, raw: u16) -> f64 {
        f64::from(raw) / f64::from(self.0)
    }

    /// Raw analog value for a displayed value (`displayed * divisor`), rounded
    /// to the nearest integer so that `0.29 * 100` writes 29, not 28.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::OutOfRange`] when the scaled value does
    /// not fit an analog join.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_raw(self, argument: &'static str, displayed: f64) -> Result<u16, InvalidArgumentError> {
        let max = f64::from(ANALOG_MAX) / f64::from(self.0);
        InvalidArgumentError::check_range(argument, displayed, 0.0, max)?;
        Ok((displayed * f64::from(self.0)).round() as u16)
    }
}
