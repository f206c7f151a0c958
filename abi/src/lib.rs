mod config;
mod error;
mod types;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

pub use config::*;
pub use error::*;
pub use types::*;

/// Console date format, e.g. `05-01-2023`.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("valid date regex");
}

/// Parse a `MM-dd-yyyy` date. Padding is mandatory and the date must exist.
pub fn parse_date(s: &str) -> Result<NaiveDate, HotelError> {
    if !DATE_RE.is_match(s) {
        return Err(HotelError::InvalidDate(s.to_string()));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| HotelError::InvalidDate(s.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
