use chrono::NaiveDate;
use derive_builder::Builder;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct NewBooking {
    pub customer_id: i32,
    pub hotel_id: i32,
    pub room_number: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Booking {
    pub booking_id: i32,
    pub customer_id: i32,
    pub hotel_id: i32,
    pub room_number: i32,
    pub booking_date: NaiveDate,
    pub price: i32,
}

/// One line of a customer's own booking history.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookingRecord {
    pub hotel_id: i32,
    pub room_number: i32,
    pub price: i32,
    pub booking_date: NaiveDate,
}

/// A booking as a manager sees it, with the customer's name.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct HotelBooking {
    pub booking_id: i32,
    pub customer_name: String,
    pub hotel_id: i32,
    pub room_number: i32,
    pub booking_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RegularCustomer {
    pub customer_id: i32,
    pub customer_name: String,
    pub bookings: i64,
}
