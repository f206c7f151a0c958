// unique violation detail on roombookings looks like:
// "Key (hotelid, roomnumber, bookingdate)=(1, 101, 2023-05-01) already exists."

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, convert::Infallible, str::FromStr};

lazy_static! {
    static ref KEY_RE: Regex =
        Regex::new(r"Key \((?P<keys>[^)]+)\)=\((?P<values>[^)]+)\)").expect("valid key regex");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingConflictInfo {
    Parsed(BookingConflict),
    UnParsed(String),
}

/// The booking slot that was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConflict {
    pub hotel_id: i32,
    pub room_number: i32,
    pub date: NaiveDate,
}

impl BookingConflictInfo {
    pub fn new(hotel_id: i32, room_number: i32, date: NaiveDate) -> Self {
        Self::Parsed(BookingConflict {
            hotel_id,
            room_number,
            date,
        })
    }
}

impl FromStr for BookingConflictInfo {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(conflict) = s.parse() {
            Ok(Self::Parsed(conflict))
        } else {
            Ok(Self::UnParsed(s.to_string()))
        }
    }
}

impl FromStr for BookingConflict {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedKey::from_str(s)?.try_into()
    }
}

impl TryFrom<ParsedKey> for BookingConflict {
    type Error = ();

    fn try_from(value: ParsedKey) -> Result<Self, Self::Error> {
        let get = |key: &str| value.0.get(key).ok_or(());

        Ok(Self {
            hotel_id: get("hotelid")?.parse().map_err(|_| ())?,
            room_number: get("roomnumber")?.parse().map_err(|_| ())?,
            date: get("bookingdate")?.parse().map_err(|_| ())?,
        })
    }
}

/// Column name to value pairs of a `Key (..)=(..)` detail.
struct ParsedKey(HashMap<String, String>);

impl FromStr for ParsedKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cap = KEY_RE.captures(s).ok_or(())?;
        let keys = cap["keys"].split(',').map(|k| k.trim().to_lowercase());
        let values: Vec<_> = cap["values"].split(',').map(|v| v.trim()).collect();

        let map: HashMap<_, _> = keys
            .zip(values.iter())
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        if map.len() != values.len() {
            return Err(());
        }

        Ok(Self(map))
    }
}
