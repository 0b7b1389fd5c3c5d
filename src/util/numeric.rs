//! Numeric coercion policies for request input and stored rows.
//!
//! Two deliberately different policies live here:
//! - `coerce_*`: boundary validation. Absent/null/empty values default
//!   to 0.0, but junk strings are an [`InputError`] reported to the
//!   caller.
//! - `lenient_*`: stored-row parsing. Anything unusable falls back to a
//!   default so one bad row never fails a whole query.

use serde_json::Value;
use thiserror::Error;

/// Malformed or missing required input, reported to the caller before
/// any side effect happens.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("field '{field}' is not numeric: {raw:?}")]
    NotNumeric { field: String, raw: String },
    #[error("{0}")]
    Invalid(String),
}

impl InputError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Coerce a JSON field to `f64`.
///
/// Absent (`Null`) and empty-string values are 0.0. Numeric strings are
/// parsed. Anything else is an error naming the field.
pub fn coerce_f64(field: &str, value: &Value) -> Result<f64, InputError> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(number) => number.as_f64().ok_or_else(|| not_numeric(field, value)),
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Ok(0.0)
            } else {
                trimmed
                    .parse::<f64>()
                    .map_err(|_| not_numeric(field, value))
            }
        }
        _ => Err(not_numeric(field, value)),
    }
}

/// Coerce a JSON field to an optional `f64`: absent and empty values
/// are `None` rather than 0.0.
pub fn coerce_opt_f64(field: &str, value: &Value) -> Result<Option<f64>, InputError> {
    match value {
        Value::Null => Ok(None),
        Value::String(raw) if raw.trim().is_empty() => Ok(None),
        _ => coerce_f64(field, value).map(Some),
    }
}

/// Coerce a JSON field to a quantity. Fractional values truncate, and
/// negatives clamp to zero.
pub fn coerce_quantity(field: &str, value: &Value) -> Result<u32, InputError> {
    let raw = coerce_f64(field, value)?;
    Ok(raw.max(0.0) as u32)
}

fn not_numeric(field: &str, value: &Value) -> InputError {
    InputError::NotNumeric {
        field: field.to_string(),
        raw: value.to_string(),
    }
}

/// Stored-row coercion: unusable values fall back silently.
pub fn lenient_f64(value: &Value, fallback: f64) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(fallback),
        Value::String(raw) => raw.trim().parse::<f64>().unwrap_or(fallback),
        _ => fallback,
    }
}

/// Stored-row coercion to an optional float. Empty strings and
/// sentinels like "N/A" are absent, not zero.
pub fn lenient_opt_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn absent_and_empty_values_coerce_to_zero() {
        assert_eq!(coerce_f64("weight", &Value::Null).unwrap(), 0.0);
        assert_eq!(coerce_f64("weight", &json!("")).unwrap(), 0.0);
        assert_eq!(coerce_f64("weight", &json!("  ")).unwrap(), 0.0);
    }

    #[test]
    fn numbers_and_numeric_strings_parse() {
        assert_eq!(coerce_f64("cost", &json!(4.25)).unwrap(), 4.25);
        assert_eq!(coerce_f64("cost", &json!("3.5")).unwrap(), 3.5);
        assert_eq!(coerce_quantity("quantity", &json!("7")).unwrap(), 7);
        assert_eq!(coerce_quantity("quantity", &json!(2.7)).unwrap(), 2);
    }

    #[test]
    fn junk_strings_are_input_errors() {
        let err = coerce_f64("weight", &json!("heavy")).unwrap_err();
        assert_eq!(
            err,
            InputError::NotNumeric {
                field: "weight".to_string(),
                raw: "\"heavy\"".to_string(),
            }
        );
        assert!(coerce_quantity("quantity", &json!(true)).is_err());
    }

    #[test]
    fn optional_coercion_distinguishes_absent_from_zero() {
        assert_eq!(coerce_opt_f64("weight", &Value::Null).unwrap(), None);
        assert_eq!(coerce_opt_f64("weight", &json!("")).unwrap(), None);
        assert_eq!(coerce_opt_f64("weight", &json!(0)).unwrap(), Some(0.0));
    }

    #[test]
    fn lenient_parsing_never_fails() {
        assert_eq!(lenient_f64(&json!("oops"), 1.0), 1.0);
        assert_eq!(lenient_f64(&json!(3), 1.0), 3.0);
        assert_eq!(lenient_opt_f64(&json!("N/A")), None);
        assert_eq!(lenient_opt_f64(&json!("2.5")), Some(2.5));
        assert_eq!(lenient_opt_f64(&Value::Null), None);
    }
}
