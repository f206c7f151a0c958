use chrono::NaiveDate;
use derive_builder::Builder;
use sqlx::FromRow;

use crate::{HotelError, Validator};

/// New price and image for a room, applied by its hotel's manager.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RoomUpdate {
    pub hotel_id: i32,
    pub room_number: i32,
    pub price: i32,
    #[builder(setter(into))]
    pub image_url: String,
}

impl Validator for RoomUpdate {
    fn validate(&self) -> Result<(), HotelError> {
        if self.price < 0 {
            return Err(HotelError::InvalidInput(format!(
                "price must not be negative: {}",
                self.price
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RepairRequest {
    pub hotel_id: i32,
    pub room_number: i32,
    pub company_id: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RepairRecord {
    pub repair_id: i32,
    pub company_id: i32,
    pub hotel_id: i32,
    pub room_number: i32,
    pub repair_date: NaiveDate,
}
