use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    /// Reject empty or whitespace-only text
    pub fn validate_required(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
        if value.chars().count() > max {
            return Err(AppError::ValidationError(format!(
                "{} too long (max {} characters)",
                field, max
            )));
        }
        Ok(())
    }

    /// Required text that also has an upper length bound
    pub fn validate_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
        Self::validate_required(field, value)?;
        Self::validate_max_length(field, value, max)
    }

    pub fn validate_id(field: &str, id: i32) -> Result<(), AppError> {
        if id <= 0 {
            return Err(AppError::ValidationError(format!(
                "{} must be positive",
                field
            )));
        }
        Ok(())
    }
}
