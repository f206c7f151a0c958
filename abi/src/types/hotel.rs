use std::fmt;

use sqlx::FromRow;

/// A hotel returned by the distance search.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct NearbyHotel {
    pub hotel_id: i32,
    pub hotel_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Room {
    pub hotel_id: i32,
    pub room_number: i32,
    pub price: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RoomAvailability {
    pub room_number: i32,
    pub price: i32,
    pub booked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    NotAvailable,
}

impl RoomAvailability {
    pub fn availability(&self) -> Availability {
        if self.booked {
            Availability::NotAvailable
        } else {
            Availability::Available
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::NotAvailable => write!(f, "Not Available"),
        }
    }
}
