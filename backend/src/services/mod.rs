//! Business logic services

pub mod billing;
pub mod catalog;
pub mod expenses;
pub mod export;
pub mod feed;
pub mod orders;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run validator-derive checks and surface the first failure as a
/// validation error.
pub fn check_input<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(|errors| {
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("input".to_string(), "invalid input".to_string()));
        AppError::Validation { field, message }
    })
}
