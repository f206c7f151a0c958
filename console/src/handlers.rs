use std::io::{BufRead, Write};

use abi::{
    format_date, HotelError, NewBookingBuilder, NewUser, RepairRequestBuilder, RoomUpdateBuilder,
};
use chrono::Local;
use hotel::Hotels;

use crate::{Console, MenuState};

fn incomplete(e: impl ToString) -> HotelError {
    HotelError::InvalidInput(e.to_string())
}

impl<'a, R: BufRead, W: Write + Send, E: Write> Console<'a, R, W, E> {
    pub(crate) async fn create_user(&mut self) -> Result<(), HotelError> {
        let name = self.term.ask("\tEnter name: ")?;
        let password = self.term.ask("\tEnter password: ")?;

        let user = self
            .manager
            .create_user(NewUser::customer(name, password))
            .await?;
        self.term.say(format!(
            "User successfully created with userID = {}",
            user.id
        ))
    }

    pub(crate) async fn log_in(&mut self) -> Result<MenuState, HotelError> {
        let user_id = self.term.ask_int("\tEnter userID: ")?;
        let password = self.term.ask("\tEnter password: ")?;

        if !self.manager.authenticate(user_id, &password).await? {
            return Err(HotelError::InvalidCredentials);
        }
        let role = self.manager.user_type(user_id).await?;

        Ok(MenuState::Authenticated { user_id, role })
    }

    pub(crate) async fn view_hotels(&mut self) -> Result<(), HotelError> {
        let latitude = self.term.ask_float("\tEnter latitude: ")?;
        let longitude = self.term.ask_float("\tEnter longitude: ")?;
        let threshold = self.config.distance_threshold;

        let hotels = self
            .manager
            .hotels_within(latitude, longitude, threshold)
            .await?;
        if hotels.is_empty() {
            return self.term.say(format!(
                "Sorry, no hotel found within {} units from given place.",
                threshold
            ));
        }

        self.term.say("\t\t\tHotel:")?;
        for hotel in hotels {
            self.term.say(format!(
                "{}\t{}\t({:.2} units away)",
                hotel.hotel_id, hotel.hotel_name, hotel.distance
            ))?;
        }
        Ok(())
    }

    pub(crate) async fn view_rooms(&mut self) -> Result<(), HotelError> {
        let hotel_id = self.term.ask_int("\tEnter hotel ID: ")?;
        let date = self.term.ask_date("\tEnter date (MM-dd-yyyy): ")?;

        let rooms = self.manager.room_availability(hotel_id, date).await?;
        if rooms.is_empty() {
            return self
                .term
                .say("No room found for the given hotel ID and date.");
        }

        self.term
            .say("Room Number \t | \t\t Price \t\t | \t\tAvailability")?;
        for room in rooms {
            self.term.say(format!(
                "{}\t\t | \t\t {}\t\t | \t\t {}",
                room.room_number,
                room.price,
                room.availability()
            ))?;
        }
        Ok(())
    }

    pub(crate) async fn book_room(&mut self, customer_id: i32) -> Result<(), HotelError> {
        let hotel_id = self.term.ask_int("\tEnter hotelID: ")?;
        let room_number = self.term.ask_int("\tEnter room number: ")?;
        let date = self.term.ask_date("\tEnter booking date (MM-dd-yyyy): ")?;

        let booking = NewBookingBuilder::default()
            .customer_id(customer_id)
            .hotel_id(hotel_id)
            .room_number(room_number)
            .date(date)
            .build()
            .map_err(incomplete)?;
        let booking = self.manager.book_room(booking).await?;

        self.term.say(format!(
            "Booking successfully! Room price: ${}",
            booking.price
        ))
    }

    pub(crate) async fn recent_bookings(&mut self, customer_id: i32) -> Result<(), HotelError> {
        let limit = self.config.history_limit;
        let bookings = self.manager.recent_bookings(customer_id, limit).await?;
        if bookings.is_empty() {
            return self.term.say("No bookings found.");
        }

        self.term.say(format!(
            "**************** Your last {} recent bookings: ****************",
            limit
        ))?;
        for booking in bookings {
            self.term.say(format!(
                " --> Hotel ID: {}\t| Room Number: {}\t| Billing information: {}\t| Booking Date: {}",
                booking.hotel_id,
                booking.room_number,
                booking.price,
                format_date(booking.booking_date)
            ))?;
        }
        Ok(())
    }

    pub(crate) async fn update_room(&mut self, manager_id: i32) -> Result<(), HotelError> {
        let hotel_id = self.term.ask_int("\tEnter hotelID: ")?;
        let room_number = self.term.ask_int("\tEnter room number: ")?;

        if !self.manager.owns_hotel(manager_id, hotel_id).await? {
            return Err(HotelError::NotAuthorized {
                manager_id,
                hotel_id,
            });
        }
        let room = self.manager.get_room(hotel_id, room_number).await?;
        self.term.say(format!(
            "Current price: {}, image URL: {}",
            room.price,
            room.image_url.as_deref().unwrap_or("-")
        ))?;

        let price = self.term.ask_int("\tEnter new price: ")?;
        let image_url = self.term.ask("\tEnter new image URL: ")?;
        let update = RoomUpdateBuilder::default()
            .hotel_id(hotel_id)
            .room_number(room_number)
            .price(price)
            .image_url(image_url)
            .build()
            .map_err(incomplete)?;

        self.manager.update_room(manager_id, update).await?;
        self.term.say("Room information updated successfully!")
    }

    pub(crate) async fn recent_updates(&mut self, manager_id: i32) -> Result<(), HotelError> {
        let count = self
            .manager
            .print_recent_updates(manager_id, self.config.history_limit, &mut self.term.output)
            .await?;
        if count == 0 {
            self.term.say("No recent updates found.")?;
        }
        Ok(())
    }

    pub(crate) async fn hotel_bookings(&mut self, manager_id: i32) -> Result<(), HotelError> {
        let from = self.term.ask_date("\tEnter the start date (MM-dd-yyyy): ")?;
        let to = self.term.ask_date("\tEnter the end date (MM-dd-yyyy): ")?;

        let bookings = self.manager.hotel_bookings(manager_id, from, to).await?;
        if bookings.is_empty() {
            return self.term.say("No bookings found in the given period.");
        }

        self.term
            .say("**************** Booking information: ****************")?;
        for booking in bookings {
            self.term.say(format!(
                " --> Booking ID: {}, Customer Name: {}, Hotel ID: {}, Room Number: {}, Booking Date: {}",
                booking.booking_id,
                booking.customer_name,
                booking.hotel_id,
                booking.room_number,
                format_date(booking.booking_date)
            ))?;
        }
        Ok(())
    }

    pub(crate) async fn regular_customers(&mut self, manager_id: i32) -> Result<(), HotelError> {
        let hotel_id = self.term.ask_int("\tEnter the hotel ID: ")?;
        let limit = self.config.history_limit;

        let customers = self
            .manager
            .regular_customers(manager_id, hotel_id, limit)
            .await?;
        if customers.is_empty() {
            return self.term.say("No bookings found for this hotel.");
        }

        self.term.say(format!(
            "******* Top {} regular customers: ********",
            limit
        ))?;
        for customer in customers {
            self.term.say(format!(
                " --> Customer ID: {}\t| Customer Name: {}\t| No. of Booking: {}",
                customer.customer_id, customer.customer_name, customer.bookings
            ))?;
        }
        Ok(())
    }

    pub(crate) async fn place_repair_request(&mut self, manager_id: i32) -> Result<(), HotelError> {
        let hotel_id = self.term.ask_int("\tEnter the hotel ID: ")?;
        let room_number = self.term.ask_int("\tEnter the room number: ")?;
        let company_id = self.term.ask_int("\tEnter the company ID: ")?;

        let request = RepairRequestBuilder::default()
            .hotel_id(hotel_id)
            .room_number(room_number)
            .company_id(company_id)
            .date(Local::now().date_naive())
            .build()
            .map_err(incomplete)?;
        self.manager
            .place_repair_request(manager_id, request)
            .await?;

        self.term.say("Repair request placed successfully.")
    }

    pub(crate) async fn repair_history(&mut self, manager_id: i32) -> Result<(), HotelError> {
        let repairs = self.manager.repair_history(manager_id).await?;
        if repairs.is_empty() {
            return self.term.say("No room repair history found.");
        }

        self.term
            .say("Company ID | Hotel ID | Room No. | Repair Date")?;
        for repair in repairs {
            self.term.say(format!(
                "{} | {} | {} | {}",
                repair.company_id,
                repair.hotel_id,
                repair.room_number,
                format_date(repair.repair_date)
            ))?;
        }
        Ok(())
    }
}
