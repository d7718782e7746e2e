use std::ops::RangeInclusive;

use thiserror::Error;

use crate::recommend::dto::{ProfileForm, RecommendationRequest};

pub const AGE_RANGE: RangeInclusive<i32> = 10..=120;
pub const WEIGHT_RANGE: RangeInclusive<f64> = 30.0..=300.0;
pub const HEIGHT_RANGE: RangeInclusive<i32> = 100..=250;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Checks a submitted form and turns it into a request body.
///
/// All fields are checked for presence before any of them is parsed, so an
/// empty form reports the first missing field rather than a parse error.
pub fn validate(form: &ProfileForm) -> Result<RecommendationRequest, ValidationError> {
    let age = required("age", &form.age)?;
    let weight = required("weight", &form.weight)?;
    let height = required("height", &form.height)?;
    let goal = required("goal", &form.goal)?;
    let activity_level = required("activityLevel", &form.activity_level)?;

    let age = parse_int("age", age, AGE_RANGE)?;
    let weight = parse_weight(weight)?;
    let height = parse_int("height", height, HEIGHT_RANGE)?;

    Ok(RecommendationRequest {
        age,
        weight,
        height,
        goal: goal.to_string(),
        activity_level: activity_level.to_string(),
    })
}

fn required<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed)
}

fn parse_int(field: &'static str, raw: &str, range: RangeInclusive<i32>) -> Result<i32, ValidationError> {
    let value: i32 = raw.parse().map_err(|_| ValidationError::NotANumber(field))?;
    if !range.contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: f64::from(*range.start()),
            max: f64::from(*range.end()),
        });
    }
    Ok(value)
}

fn parse_weight(raw: &str) -> Result<f64, ValidationError> {
    // "70,5" is how a comma-locale keyboard types it
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::NotANumber("weight"))?;
    if !WEIGHT_RANGE.contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "weight",
            min: *WEIGHT_RANGE.start(),
            max: *WEIGHT_RANGE.end(),
        });
    }
    Ok(value)
}
