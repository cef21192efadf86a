use crate::error::ApiError;

/// Longest accepted subject or topic name.
const MAX_NAME_LEN: usize = 255;

/// Validate a subject or topic display name.
pub fn validate_name(name: &str) -> Result<(), ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("Name cannot be empty".to_string()));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(ApiError::Validation(format!(
            "Name cannot be longer than {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a daily study budget in hours.
///
/// Zero is allowed: it simply produces empty schedule days.
pub fn validate_daily_hours(hours: f64) -> Result<(), ApiError> {
    if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
        return Err(ApiError::Validation(
            "Daily study hours must be between 0 and 24".to_string(),
        ));
    }
    Ok(())
}

/// Validate a quiz accuracy percentage.
pub fn validate_accuracy(accuracy: i32) -> Result<(), ApiError> {
    if !(0..=100).contains(&accuracy) {
        return Err(ApiError::Validation(
            "Accuracy must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}
