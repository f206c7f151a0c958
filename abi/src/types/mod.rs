mod booking;
mod hotel;
mod maintenance;
mod user;

pub use booking::*;
pub use hotel::*;
pub use maintenance::*;
pub use user::*;

use crate::HotelError;

pub trait Validator {
    fn validate(&self) -> Result<(), HotelError>;
}

/// Non-empty after trimming and within the column width.
pub(crate) fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), HotelError> {
    if value.trim().is_empty() {
        return Err(HotelError::InvalidInput(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max_len {
        return Err(HotelError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}
