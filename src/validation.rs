use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::AppError;

pub const MISSING_FIELD: &str = "Missing data for required field.";

/// Per-field validation messages, keyed by payload field name.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Require a present, non-blank string of at most `max_len` characters.
    pub fn required_str(
        &mut self,
        field: &str,
        value: Option<String>,
        max_len: usize,
    ) -> Option<String> {
        match value {
            None => {
                self.add(field, MISSING_FIELD);
                None
            }
            Some(v) => self.check_str(field, v, max_len),
        }
    }

    /// Validate a string only when the caller supplied one.
    pub fn optional_str(
        &mut self,
        field: &str,
        value: Option<String>,
        max_len: usize,
    ) -> Option<String> {
        value.and_then(|v| self.check_str(field, v, max_len))
    }

    /// Require a present, finite, non-negative price.
    pub fn required_price(&mut self, field: &str, value: Option<f64>) -> Option<f64> {
        match value {
            None => {
                self.add(field, MISSING_FIELD);
                None
            }
            Some(v) => self.check_price(field, v),
        }
    }

    pub fn optional_price(&mut self, field: &str, value: Option<f64>) -> Option<f64> {
        value.and_then(|v| self.check_price(field, v))
    }

    pub fn non_negative(&mut self, field: &str, value: Option<i32>) -> Option<i32> {
        match value {
            Some(v) if v < 0 => {
                self.add(field, "Must be greater than or equal to 0.");
                None
            }
            other => other,
        }
    }

    /// Turn collected messages into `AppError::Validation`, or hand back `value`.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, AppError> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(AppError::Validation(self))
        }
    }

    fn check_str(&mut self, field: &str, value: String, max_len: usize) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, "Field may not be empty.");
            return None;
        }
        if trimmed.chars().count() > max_len {
            self.add(field, format!("Longer than maximum length {max_len}."));
            return None;
        }
        Some(trimmed.to_string())
    }

    fn check_price(&mut self, field: &str, value: f64) -> Option<f64> {
        if !value.is_finite() || value < 0.0 {
            self.add(field, "Must be a non-negative number.");
            return None;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_strings_are_reported_per_field() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required_str("name", None, 255), None);
        assert_eq!(errors.required_str("email", Some("   ".into()), 320), None);
        assert_eq!(
            errors.required_str("phone", Some(" 555-0100 ".into()), 15),
            Some("555-0100".to_string())
        );

        assert_eq!(errors.get("name"), Some(&[MISSING_FIELD.to_string()][..]));
        assert!(errors.get("email").is_some());
        assert!(errors.get("phone").is_none());
    }

    #[test]
    fn over_long_strings_are_rejected() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required_str("phone", Some("1".repeat(16)), 15), None);
        assert_eq!(
            errors.get("phone"),
            Some(&["Longer than maximum length 15.".to_string()][..])
        );
    }

    #[test]
    fn prices_must_be_finite_and_non_negative() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required_price("price", Some(0.0)), Some(0.0));
        assert_eq!(errors.required_price("price", Some(-1.0)), None);
        assert_eq!(errors.optional_price("other", Some(f64::NAN)), None);
        assert_eq!(errors.optional_price("unset", None), None);
        assert_eq!(errors.get("price").map(<[String]>::len), Some(1));
        assert!(errors.get("other").is_some());
        assert!(errors.get("unset").is_none());
    }

    #[test]
    fn finish_returns_validation_error_when_anything_failed() {
        let mut errors = FieldErrors::new();
        errors.non_negative("stock_level", Some(-3));
        let result = errors.finish(|| ());
        assert!(matches!(result, Err(AppError::Validation(_))));

        let clean = FieldErrors::new().finish(|| 7);
        assert!(matches!(clean, Ok(7)));
    }
}
