//! Field validation for recipe input
//!
//! Create and list requests use `validator` derive attributes. Partial
//! updates carry explicit-null information that the derive macros cannot
//! see, so they are checked with the helpers below, which produce the same
//! codes as the derived rules.

use crate::types::FieldError;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

/// Maximum title length in characters
pub const TITLE_MAX_LENGTH: u64 = 100;

/// Minimum value for prep and cook times (minutes)
pub const MIN_DURATION_MINUTES: i64 = 0;

/// Minimum number of servings
pub const MIN_SERVINGS: i64 = 1;

/// Validate recipe title length
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.chars().count() as u64;
    if length > TITLE_MAX_LENGTH {
        let mut err = ValidationError::new("length");
        err.message = Some(Cow::from("title must be at most 100 characters"));
        err.add_param(Cow::from("max"), &TITLE_MAX_LENGTH);
        err.add_param(Cow::from("value"), &title);
        return Err(err);
    }
    Ok(())
}

/// Validate a prep or cook time in minutes
pub fn validate_duration_minutes(minutes: i32) -> Result<(), ValidationError> {
    if i64::from(minutes) < MIN_DURATION_MINUTES {
        let mut err = ValidationError::new("range");
        err.message = Some(Cow::from("must be greater than or equal to 0"));
        err.add_param(Cow::from("min"), &MIN_DURATION_MINUTES);
        err.add_param(Cow::from("value"), &minutes);
        return Err(err);
    }
    Ok(())
}

/// Validate number of servings
pub fn validate_servings(servings: i32) -> Result<(), ValidationError> {
    if i64::from(servings) < MIN_SERVINGS {
        let mut err = ValidationError::new("range");
        err.message = Some(Cow::from("must be greater than or equal to 1"));
        err.add_param(Cow::from("min"), &MIN_SERVINGS);
        err.add_param(Cow::from("value"), &servings);
        return Err(err);
    }
    Ok(())
}

/// Error for a required field explicitly set to `null`
pub fn null_not_allowed() -> ValidationError {
    let mut err = ValidationError::new("null");
    err.message = Some(Cow::from("field cannot be null"));
    err
}

/// Record `result` against `field` if it failed
pub(crate) fn collect(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<(), ValidationError>,
) {
    if let Err(err) = result {
        errors.add(field, err);
    }
}

/// Flatten `validator` errors into a stable, field-sorted list for API responses
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldError {
                field: field.clone(),
                code: err.code.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field)),
            })
        })
        .collect();

    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}
