use std::ops::RangeInclusive;

pub const RATING_RANGE: RangeInclusive<i32> = 1..=5;
pub const MAX_TEXT_LENGTH: usize = 1000;

/// A rejected write, naming the field that broke the rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed for `{field}`: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn check_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

pub fn check_score(field: &str, value: i32) -> Result<(), ValidationError> {
    if !RATING_RANGE.contains(&value) {
        return Err(ValidationError::new(
            field,
            format!(
                "must be between {} and {}, got {}",
                RATING_RANGE.start(),
                RATING_RANGE.end(),
                value
            ),
        ));
    }
    Ok(())
}

/// Trims free text and enforces the length limit on the trimmed value.
/// Text that is empty after trimming is dropped.
pub fn normalize_text(field: &str, value: String) -> Result<Option<String>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let length = trimmed.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(ValidationError::new(
            field,
            format!(
                "must be at most {} characters, got {}",
                MAX_TEXT_LENGTH, length
            ),
        ));
    }

    Ok(Some(trimmed.to_string()))
}
