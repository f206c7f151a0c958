use std::io::Write;

use abi::{
    Booking, BookingRecord, HotelBooking, HotelError, NearbyHotel, NewBooking, NewUser,
    RegularCustomer, RepairRecord, RepairRequest, Room, RoomAvailability, RoomUpdate, User,
    UserType,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

mod executor;
mod manager;

pub use executor::*;

/// Owns the database connection every operation runs on.
#[derive(Debug, Clone)]
pub struct HotelManager {
    pool: PgPool,
}

#[async_trait]
pub trait Hotels {
    /// create a user, returning it with its generated id
    async fn create_user(&self, user: NewUser) -> Result<User, HotelError>;
    /// check a user id / password pair
    async fn authenticate(&self, user_id: i32, password: &str) -> Result<bool, HotelError>;
    /// look up the role of a user
    async fn user_type(&self, user_id: i32) -> Result<UserType, HotelError>;
    /// hotels whose distance to the given place is at most `threshold`, closest first
    async fn hotels_within(
        &self,
        latitude: f64,
        longitude: f64,
        threshold: f64,
    ) -> Result<Vec<NearbyHotel>, HotelError>;
    /// every room of a hotel and whether it is booked on `date`
    async fn room_availability(
        &self,
        hotel_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<RoomAvailability>, HotelError>;
    /// book a room for one date, fails if the room is already taken
    async fn book_room(&self, booking: NewBooking) -> Result<Booking, HotelError>;
    /// latest bookings of a customer
    async fn recent_bookings(
        &self,
        customer_id: i32,
        limit: i64,
    ) -> Result<Vec<BookingRecord>, HotelError>;
    /// get a room by hotel and number
    async fn get_room(&self, hotel_id: i32, room_number: i32) -> Result<Room, HotelError>;
    /// whether the manager runs the hotel
    async fn owns_hotel(&self, manager_id: i32, hotel_id: i32) -> Result<bool, HotelError>;
    /// change price and image of a room and log the change
    async fn update_room(&self, manager_id: i32, update: RoomUpdate) -> Result<Room, HotelError>;
    /// print the latest room updates made by a manager, returns the number of rows
    async fn print_recent_updates(
        &self,
        manager_id: i32,
        limit: i64,
        out: &mut (dyn Write + Send),
    ) -> Result<usize, HotelError>;
    /// bookings between two dates (inclusive) at the hotels a manager runs
    async fn hotel_bookings(
        &self,
        manager_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HotelBooking>, HotelError>;
    /// customers with the most bookings at a hotel
    async fn regular_customers(
        &self,
        manager_id: i32,
        hotel_id: i32,
        limit: i64,
    ) -> Result<Vec<RegularCustomer>, HotelError>;
    /// record a repair and the manager's request for it
    async fn place_repair_request(
        &self,
        manager_id: i32,
        request: RepairRequest,
    ) -> Result<RepairRecord, HotelError>;
    /// requested repairs on the hotels a manager runs, newest first
    async fn repair_history(&self, manager_id: i32) -> Result<Vec<RepairRecord>, HotelError>;
}
