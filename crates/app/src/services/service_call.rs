//! Typed access to the JSON payload of a service call.
//!
//! Every accessor validates before returning, so a handler that parses all of
//! its arguments up front never writes a join for a call that is rejected.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use joinbridge_domain::error::InvalidArgumentError;

/// Arguments of one service call. A `null` payload is treated as empty.
#[derive(Debug, Default)]
pub struct ServiceArgs {
    fields: Map<String, Value>,
}

impl TryFrom<Value> for ServiceArgs {
    type Error = InvalidArgumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(InvalidArgumentError::WrongType {
                argument: "data",
                expected: "an object",
            }),
        }
    }
}

impl ServiceArgs {
    fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    /// Optional number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::WrongType`] when present but not a number.
    pub fn f64(&self, name: &'static str) -> Result<Option<f64>, InvalidArgumentError> {
        self.field(name)
            .map(|value| {
                value.as_f64().ok_or(InvalidArgumentError::WrongType {
                    argument: name,
                    expected: "a number",
                })
            })
            .transpose()
    }

    /// Required number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::Missing`] when absent, or a type error.
    pub fn require_f64(&self, name: &'static str) -> Result<f64, InvalidArgumentError> {
        self.f64(name)?.ok_or(InvalidArgumentError::Missing(name))
    }

    /// Required boolean.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::Missing`] when absent, or a type error.
    pub fn require_bool(&self, name: &'static str) -> Result<bool, InvalidArgumentError> {
        self.field(name)
            .ok_or(InvalidArgumentError::Missing(name))?
            .as_bool()
            .ok_or(InvalidArgumentError::WrongType {
                argument: name,
                expected: "a boolean",
            })
    }

    /// Required string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::Missing`] when absent, or a type error.
    pub fn require_str(&self, name: &'static str) -> Result<&str, InvalidArgumentError> {
        self.field(name)
            .ok_or(InvalidArgumentError::Missing(name))?
            .as_str()
            .ok_or(InvalidArgumentError::WrongType {
                argument: name,
                expected: "a string",
            })
    }

    /// Optional brightness on the 0–255 scale; fractions are truncated.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::OutOfRange`] outside `0..=255`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn brightness(&self) -> Result<Option<u8>, InvalidArgumentError> {
        self.f64("brightness")?
            .map(|value| {
                InvalidArgumentError::check_range("brightness", value, 0.0, 255.0)
                    .map(|value| value as u8)
            })
            .transpose()
    }

    /// Required snake_case enum value such as an HVAC or fan mode.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::UnsupportedMode`] for an unknown name.
    pub fn require_mode<T: DeserializeOwned>(
        &self,
        name: &'static str,
    ) -> Result<T, InvalidArgumentError> {
        let raw = self.require_str(name)?;
        serde_json::from_value(Value::String(raw.to_string()))
            .map_err(|_| InvalidArgumentError::UnsupportedMode(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joinbridge_domain::device::climate::HvacMode;
    use serde_json::json;

    fn args(value: Value) -> ServiceArgs {
        ServiceArgs::try_from(value).unwrap()
    }

    #[test]
    fn should_treat_null_payload_as_empty() {
        let args = args(Value::Null);
        assert_eq!(args.f64("transition").unwrap(), None);
    }

    #[test]
    fn should_reject_non_object_payload() {
        let result = ServiceArgs::try_from(json!([1, 2]));
        assert!(matches!(result, Err(InvalidArgumentError::WrongType { .. })));
    }

    #[test]
    fn should_report_missing_and_mistyped_arguments() {
        let args = args(json!({"position": "half"}));
        assert_eq!(
            args.require_f64("volume_level"),
            Err(InvalidArgumentError::Missing("volume_level"))
        );
        assert!(matches!(
            args.require_f64("position"),
            Err(InvalidArgumentError::WrongType { argument: "position", .. })
        ));
    }

    #[test]
    fn should_truncate_brightness_and_check_range() {
        assert_eq!(args(json!({"brightness": 127.9})).brightness().unwrap(), Some(127));
        assert!(args(json!({"brightness": 300})).brightness().is_err());
    }

    #[test]
    fn should_parse_snake_case_mode() {
        let mode: HvacMode = args(json!({"hvac_mode": "heat_cool"}))
            .require_mode("hvac_mode")
            .unwrap();
        assert_eq!(mode, HvacMode::HeatCool);

        let result: Result<HvacMode, _> =
            args(json!({"hvac_mode": "dry"})).require_mode("hvac_mode");
        assert_eq!(
            result,
            Err(InvalidArgumentError::UnsupportedMode("dry".to_string()))
        );
    }
}
