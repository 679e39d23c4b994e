use chrono::NaiveDate;

use crate::entities::sea_orm_active_enums::Gender;
use crate::error::AppError;

pub fn required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(field.to_string()));
    }
    Ok(())
}

/// An email must contain both `@` and `.` to be accepted.
pub fn email(field: &str, value: &str) -> Result<String, AppError> {
    if value.contains('@') && value.contains('.') {
        Ok(value.to_string())
    } else {
        Err(AppError::Validation(field.to_string()))
    }
}

pub fn date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(field.to_string()))
}

pub fn gender(field: &str, value: &str) -> Result<Gender, AppError> {
    match value {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "other" => Ok(Gender::Other),
        _ => Err(AppError::Validation(field.to_string())),
    }
}
