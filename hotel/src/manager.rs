use std::io::Write;

use abi::{
    Booking, BookingConflictInfo, BookingRecord, DbConfig, HotelBooking, HotelError, NearbyHotel,
    NewBooking, NewUser, RegularCustomer, RepairRecord, RepairRequest, Room, RoomAvailability,
    RoomUpdate, User, UserType, Validator,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

use crate::{executor, HotelManager, Hotels};

#[async_trait]
impl Hotels for HotelManager {
    async fn create_user(&self, user: NewUser) -> Result<User, HotelError> {
        user.validate()?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO Users (name, password, userType) VALUES ($1, $2, $3) RETURNING userID",
        )
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.user_type.to_string())
        .fetch_one(&self.pool)
        .await?;

        info!(user_id = id, "user created");
        Ok(User {
            id,
            name: user.name,
            user_type: user.user_type,
        })
    }

    async fn authenticate(&self, user_id: i32, password: &str) -> Result<bool, HotelError> {
        let count = self
            .query_count(
                "SELECT userID FROM Users WHERE userID = $1 AND password = $2",
                &[user_id.into(), password.into()],
            )
            .await?;
        Ok(count > 0)
    }

    async fn user_type(&self, user_id: i32) -> Result<UserType, HotelError> {
        let user_type: Option<String> =
            sqlx::query_scalar("SELECT userType FROM Users WHERE userID = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        user_type.ok_or(HotelError::NotFoundRow)?.parse()
    }

    async fn hotels_within(
        &self,
        latitude: f64,
        longitude: f64,
        threshold: f64,
    ) -> Result<Vec<NearbyHotel>, HotelError> {
        let hotels = sqlx::query_as(
            "SELECT hotelID AS hotel_id, hotelName AS hotel_name, latitude, longitude, \
             calculate_distance($1, $2, latitude, longitude) AS distance \
             FROM Hotel WHERE calculate_distance($1, $2, latitude, longitude) <= $3 \
             ORDER BY distance, hotelID",
        )
        .bind(latitude)
        .bind(longitude)
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(hotels)
    }

    async fn room_availability(
        &self,
        hotel_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<RoomAvailability>, HotelError> {
        let rooms = sqlx::query_as(
            "SELECT R.roomNumber AS room_number, R.price, RB.bookingID IS NOT NULL AS booked \
             FROM Rooms R LEFT JOIN RoomBookings RB \
             ON R.hotelID = RB.hotelID AND R.roomNumber = RB.roomNumber AND RB.bookingDate = $2 \
             WHERE R.hotelID = $1 ORDER BY R.roomNumber",
        )
        .bind(hotel_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    async fn book_room(&self, booking: NewBooking) -> Result<Booking, HotelError> {
        let NewBooking {
            customer_id,
            hotel_id,
            room_number,
            date,
        } = booking;

        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let taken: Option<i32> = sqlx::query_scalar(
            "SELECT bookingID FROM RoomBookings WHERE hotelID = $1 AND roomNumber = $2 AND bookingDate = $3",
        )
        .bind(hotel_id)
        .bind(room_number)
        .bind(date)
        .fetch_optional(&mut *tx)
        .await?;
        if taken.is_some() {
            return Err(HotelError::RoomNotAvailable(BookingConflictInfo::new(
                hotel_id,
                room_number,
                date,
            )));
        }

        let price: Option<i32> =
            sqlx::query_scalar("SELECT price FROM Rooms WHERE hotelID = $1 AND roomNumber = $2")
                .bind(hotel_id)
                .bind(room_number)
                .fetch_optional(&mut *tx)
                .await?;
        let price = price.ok_or(HotelError::RoomNotFound {
            hotel_id,
            room_number,
        })?;

        // the unique key on (hotel, room, date) still guards against other clients
        let booking_id: i32 = sqlx::query_scalar(
            "INSERT INTO RoomBookings (customerID, hotelID, roomNumber, bookingDate) \
             VALUES ($1, $2, $3, $4) RETURNING bookingID",
        )
        .bind(customer_id)
        .bind(hotel_id)
        .bind(room_number)
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(booking_id, hotel_id, room_number, %date, "room booked");
        Ok(Booking {
            booking_id,
            customer_id,
            hotel_id,
            room_number,
            booking_date: date,
            price,
        })
    }

    async fn recent_bookings(
        &self,
        customer_id: i32,
        limit: i64,
    ) -> Result<Vec<BookingRecord>, HotelError> {
        let bookings = sqlx::query_as(
            "SELECT RB.hotelID AS hotel_id, RB.roomNumber AS room_number, R.price, \
             RB.bookingDate AS booking_date \
             FROM RoomBookings RB JOIN Rooms R \
             ON RB.hotelID = R.hotelID AND RB.roomNumber = R.roomNumber \
             WHERE RB.customerID = $1 \
             ORDER BY RB.bookingDate DESC, RB.bookingID DESC LIMIT $2",
        )
        .bind(customer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn get_room(&self, hotel_id: i32, room_number: i32) -> Result<Room, HotelError> {
        let room: Option<Room> = sqlx::query_as(
            "SELECT hotelID AS hotel_id, roomNumber AS room_number, price, imageURL AS image_url \
             FROM Rooms WHERE hotelID = $1 AND roomNumber = $2",
        )
        .bind(hotel_id)
        .bind(room_number)
        .fetch_optional(&self.pool)
        .await?;

        room.ok_or(HotelError::RoomNotFound {
            hotel_id,
            room_number,
        })
    }

    async fn owns_hotel(&self, manager_id: i32, hotel_id: i32) -> Result<bool, HotelError> {
        let count = self
            .query_count(
                "SELECT hotelID FROM Hotel WHERE hotelID = $1 AND managerUserID = $2",
                &[hotel_id.into(), manager_id.into()],
            )
            .await?;
        Ok(count > 0)
    }

    async fn update_room(&self, manager_id: i32, update: RoomUpdate) -> Result<Room, HotelError> {
        update.validate()?;
        self.ensure_manager(manager_id, update.hotel_id).await?;

        let mut tx = self.pool.begin().await?;
        let room: Option<Room> = sqlx::query_as(
            "UPDATE Rooms SET price = $1, imageURL = $2 WHERE hotelID = $3 AND roomNumber = $4 \
             RETURNING hotelID AS hotel_id, roomNumber AS room_number, price, imageURL AS image_url",
        )
        .bind(update.price)
        .bind(&update.image_url)
        .bind(update.hotel_id)
        .bind(update.room_number)
        .fetch_optional(&mut *tx)
        .await?;
        let room = room.ok_or(HotelError::RoomNotFound {
            hotel_id: update.hotel_id,
            room_number: update.room_number,
        })?;

        executor::execute(
            &mut *tx,
            "INSERT INTO RoomUpdatesLog (managerID, hotelID, roomNumber, updatedOn) \
             VALUES ($1, $2, $3, NOW())",
            &[
                manager_id.into(),
                update.hotel_id.into(),
                update.room_number.into(),
            ],
        )
        .await?;
        tx.commit().await?;

        info!(
            manager_id,
            hotel_id = room.hotel_id,
            room_number = room.room_number,
            "room updated"
        );
        Ok(room)
    }

    async fn print_recent_updates(
        &self,
        manager_id: i32,
        limit: i64,
        out: &mut (dyn Write + Send),
    ) -> Result<usize, HotelError> {
        self.query_print(
            r#"SELECT updateNumber AS "Update No.", managerID AS "Manager ID",
               hotelID AS "Hotel ID", roomNumber AS "Room No.", updatedOn AS "Update Date"
               FROM RoomUpdatesLog WHERE managerID = $1
               ORDER BY updatedOn DESC, updateNumber DESC LIMIT $2"#,
            &[manager_id.into(), limit.into()],
            out,
        )
        .await
    }

    async fn hotel_bookings(
        &self,
        manager_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HotelBooking>, HotelError> {
        if from > to {
            return Err(HotelError::InvalidInput(
                "start date must not be after end date".to_string(),
            ));
        }

        let bookings = sqlx::query_as(
            "SELECT RB.bookingID AS booking_id, U.name AS customer_name, RB.hotelID AS hotel_id, \
             RB.roomNumber AS room_number, RB.bookingDate AS booking_date \
             FROM RoomBookings RB \
             JOIN Users U ON RB.customerID = U.userID \
             JOIN Hotel H ON RB.hotelID = H.hotelID \
             WHERE H.managerUserID = $1 AND RB.bookingDate BETWEEN $2 AND $3 \
             ORDER BY RB.bookingDate, RB.bookingID",
        )
        .bind(manager_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn regular_customers(
        &self,
        manager_id: i32,
        hotel_id: i32,
        limit: i64,
    ) -> Result<Vec<RegularCustomer>, HotelError> {
        self.ensure_manager(manager_id, hotel_id).await?;

        let customers = sqlx::query_as(
            "SELECT U.userID AS customer_id, U.name AS customer_name, \
             COUNT(RB.bookingID) AS bookings \
             FROM Users U JOIN RoomBookings RB ON U.userID = RB.customerID \
             WHERE RB.hotelID = $1 \
             GROUP BY U.userID, U.name \
             ORDER BY bookings DESC, U.userID LIMIT $2",
        )
        .bind(hotel_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn place_repair_request(
        &self,
        manager_id: i32,
        request: RepairRequest,
    ) -> Result<RepairRecord, HotelError> {
        self.ensure_manager(manager_id, request.hotel_id).await?;
        self.get_room(request.hotel_id, request.room_number).await?;

        let mut tx = self.pool.begin().await?;
        let repair: RepairRecord = sqlx::query_as(
            "INSERT INTO RoomRepairs (companyID, hotelID, roomNumber, repairDate) \
             VALUES ($1, $2, $3, $4) \
             RETURNING repairID AS repair_id, companyID AS company_id, hotelID AS hotel_id, \
             roomNumber AS room_number, repairDate AS repair_date",
        )
        .bind(request.company_id)
        .bind(request.hotel_id)
        .bind(request.room_number)
        .bind(request.date)
        .fetch_one(&mut *tx)
        .await?;

        executor::execute(
            &mut *tx,
            "INSERT INTO RoomRepairRequests (managerID, repairID) VALUES ($1, $2)",
            &[manager_id.into(), repair.repair_id.into()],
        )
        .await?;
        tx.commit().await?;

        info!(manager_id, repair_id = repair.repair_id, "repair requested");
        Ok(repair)
    }

    async fn repair_history(&self, manager_id: i32) -> Result<Vec<RepairRecord>, HotelError> {
        let repairs = sqlx::query_as(
            "SELECT RR.repairID AS repair_id, RR.companyID AS company_id, RR.hotelID AS hotel_id, \
             RR.roomNumber AS room_number, RR.repairDate AS repair_date \
             FROM RoomRepairs RR \
             JOIN RoomRepairRequests RRR ON RR.repairID = RRR.repairID \
             JOIN Hotel H ON RR.hotelID = H.hotelID \
             WHERE H.managerUserID = $1 \
             ORDER BY RR.repairDate DESC, RR.repairID DESC",
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(repairs)
    }
}

impl HotelManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_config(config: &DbConfig) -> Result<Self, HotelError> {
        let pool = PgPoolOptions::default()
            .max_connections(config.max_connections)
            .connect(&config.to_url())
            .await?;

        info!(url = %config.redacted_url(), "connected");
        Ok(Self::new(pool))
    }

    /// Close the connection, errors on the way out are ignored.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("connection closed");
    }

    /// Checked on every call, never cached. Runs on the pool, so call it
    /// before opening a transaction.
    async fn ensure_manager(&self, manager_id: i32, hotel_id: i32) -> Result<(), HotelError> {
        if self.owns_hotel(manager_id, hotel_id).await? {
            return Ok(());
        }

        warn!(manager_id, hotel_id, "manager does not own hotel");
        Err(HotelError::NotAuthorized {
            manager_id,
            hotel_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use abi::{NewBookingBuilder, RepairRequestBuilder, RoomUpdateBuilder};

    use super::*;
    use crate::test_utils::seed;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, month, day).unwrap()
    }

    fn booking(customer_id: i32, hotel_id: i32, room_number: i32, date: NaiveDate) -> NewBooking {
        NewBookingBuilder::default()
            .customer_id(customer_id)
            .hotel_id(hotel_id)
            .room_number(room_number)
            .date(date)
            .build()
            .unwrap()
    }

    async fn count_bookings(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM RoomBookings")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn create_user_should_return_increasing_ids() {
        let manager = HotelManager::new(migrated_pool.clone());

        let first = manager
            .create_user(NewUser::customer("Alice", "pw1"))
            .await
            .unwrap();
        assert_eq!(first.user_type, UserType::Customer);

        let (count, user_type): (i64, String) = sqlx::query_as(
            "SELECT COUNT(*), MAX(userType) FROM Users WHERE name = 'Alice' AND password = 'pw1'",
        )
        .fetch_one(&migrated_pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
        assert_eq!(user_type, "Customer");

        let second = manager
            .create_user(NewUser::customer("Alice", "pw1"))
            .await
            .unwrap();
        assert!(second.id > first.id);
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn create_user_should_reject_empty_name() {
        let manager = HotelManager::new(migrated_pool.clone());

        let err = manager
            .create_user(NewUser::customer("", "pw1"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            HotelError::InvalidInput("name must not be empty".to_string())
        );
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn authenticate_and_user_type_should_work() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        assert!(manager.authenticate(seed.customer_id, "cpw").await.unwrap());
        assert!(!manager.authenticate(seed.customer_id, "mpw").await.unwrap());
        assert!(!manager.authenticate(-1, "cpw").await.unwrap());

        assert_eq!(
            manager.user_type(seed.customer_id).await.unwrap(),
            UserType::Customer
        );
        assert_eq!(
            manager.user_type(seed.manager_id).await.unwrap(),
            UserType::Manager
        );
        assert_eq!(
            manager.user_type(-1).await.unwrap_err(),
            HotelError::NotFoundRow
        );
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn hotels_within_should_filter_by_distance() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        let hotels = manager.hotels_within(0.0, 0.0, 30.0).await.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].hotel_id, seed.hotel_id);
        assert_eq!(hotels[0].hotel_name, "Seaside");
        assert_eq!(hotels[0].distance, 5.0);

        // exactly on the threshold still counts
        let hotels = manager.hotels_within(0.0, 0.0, 5.0).await.unwrap();
        assert_eq!(hotels.len(), 1);

        let hotels = manager.hotels_within(-50.0, -50.0, 30.0).await.unwrap();
        assert!(hotels.is_empty());
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn availability_should_flip_after_booking() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        let rooms = manager
            .room_availability(seed.hotel_id, day(5, 1))
            .await
            .unwrap();
        assert_eq!(rooms.len(), 2);
        assert!(rooms.iter().all(|r| !r.booked));

        let booked = manager
            .book_room(booking(seed.customer_id, seed.hotel_id, 101, day(5, 1)))
            .await
            .unwrap();
        assert_eq!(booked.price, 120);
        assert_eq!(booked.booking_date, day(5, 1));

        let rooms = manager
            .room_availability(seed.hotel_id, day(5, 1))
            .await
            .unwrap();
        assert_eq!(rooms[0].room_number, 101);
        assert!(rooms[0].booked);
        assert_eq!(rooms[1].room_number, 102);
        assert!(!rooms[1].booked);

        // other dates are untouched
        let rooms = manager
            .room_availability(seed.hotel_id, day(5, 2))
            .await
            .unwrap();
        assert!(rooms.iter().all(|r| !r.booked));
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn double_booking_should_be_rejected() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        manager
            .book_room(booking(seed.customer_id, seed.hotel_id, 101, day(5, 1)))
            .await
            .unwrap();
        let err = manager
            .book_room(booking(seed.manager_id, seed.hotel_id, 101, day(5, 1)))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            HotelError::RoomNotAvailable(BookingConflictInfo::new(seed.hotel_id, 101, day(5, 1)))
        );
        assert_eq!(count_bookings(&migrated_pool).await, 1);
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn booking_missing_room_should_fail() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        let err = manager
            .book_room(booking(seed.customer_id, seed.hotel_id, 999, day(5, 1)))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            HotelError::RoomNotFound {
                hotel_id: seed.hotel_id,
                room_number: 999
            }
        );
        assert_eq!(count_bookings(&migrated_pool).await, 0);
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn recent_bookings_should_be_newest_first_and_limited() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        for d in 1..=6 {
            manager
                .book_room(booking(seed.customer_id, seed.hotel_id, 102, day(6, d)))
                .await
                .unwrap();
        }

        let bookings = manager.recent_bookings(seed.customer_id, 5).await.unwrap();
        assert_eq!(bookings.len(), 5);
        assert_eq!(bookings[0].booking_date, day(6, 6));
        assert_eq!(bookings[4].booking_date, day(6, 2));
        assert!(bookings.iter().all(|b| b.price == 95));

        let none = manager.recent_bookings(seed.manager_id, 5).await.unwrap();
        assert!(none.is_empty());
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn update_room_by_non_owner_should_change_nothing() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        let update = RoomUpdateBuilder::default()
            .hotel_id(seed.hotel_id)
            .room_number(101)
            .price(1)
            .image_url("http://img/hacked.png")
            .build()
            .unwrap();
        let err = manager
            .update_room(seed.other_manager_id, update)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            HotelError::NotAuthorized {
                manager_id: seed.other_manager_id,
                hotel_id: seed.hotel_id
            }
        );

        let room = manager.get_room(seed.hotel_id, 101).await.unwrap();
        assert_eq!(room.price, 120);
        assert_eq!(room.image_url.as_deref(), Some("http://img/101.png"));

        let logged: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM RoomUpdatesLog")
            .fetch_one(&migrated_pool)
            .await
            .unwrap();
        assert_eq!(logged, 0);
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn update_room_should_change_room_and_log() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        let update = RoomUpdateBuilder::default()
            .hotel_id(seed.hotel_id)
            .room_number(102)
            .price(150)
            .image_url("http://img/102.png")
            .build()
            .unwrap();
        let room = manager.update_room(seed.manager_id, update).await.unwrap();
        assert_eq!(room.price, 150);
        assert_eq!(room.image_url.as_deref(), Some("http://img/102.png"));

        let mut out = Vec::new();
        let count = manager
            .print_recent_updates(seed.manager_id, 5, &mut out)
            .await
            .unwrap();
        assert_eq!(count, 1);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Update No.\tManager ID\tHotel ID\tRoom No.\tUpdate Date\t\n"));
        assert!(out.contains(&format!("\t{}\t{}\t102\t", seed.manager_id, seed.hotel_id)));

        let mut out = Vec::new();
        let count = manager
            .print_recent_updates(seed.other_manager_id, 5, &mut out)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn update_missing_room_should_fail() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        let update = RoomUpdateBuilder::default()
            .hotel_id(seed.hotel_id)
            .room_number(404)
            .price(10)
            .image_url("")
            .build()
            .unwrap();
        let err = manager.update_room(seed.manager_id, update).await.unwrap_err();
        assert_eq!(
            err,
            HotelError::RoomNotFound {
                hotel_id: seed.hotel_id,
                room_number: 404
            }
        );
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn hotel_bookings_should_cover_own_hotels_in_range() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        for (hotel, room, date) in [
            (seed.hotel_id, 101, day(5, 1)),
            (seed.hotel_id, 102, day(5, 3)),
            (seed.hotel_id, 101, day(7, 1)),
            (seed.far_hotel_id, 1, day(5, 2)),
        ] {
            manager
                .book_room(booking(seed.customer_id, hotel, room, date))
                .await
                .unwrap();
        }

        let bookings = manager
            .hotel_bookings(seed.manager_id, day(5, 1), day(5, 31))
            .await
            .unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].booking_date, day(5, 1));
        assert_eq!(bookings[1].booking_date, day(5, 3));
        assert!(bookings.iter().all(|b| b.customer_name == "Carl"));

        let err = manager
            .hotel_bookings(seed.manager_id, day(5, 31), day(5, 1))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            HotelError::InvalidInput("start date must not be after end date".to_string())
        );
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn regular_customers_should_rank_by_bookings() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        for d in 1..=3 {
            manager
                .book_room(booking(seed.customer_id, seed.hotel_id, 101, day(8, d)))
                .await
                .unwrap();
        }
        manager
            .book_room(booking(seed.other_manager_id, seed.hotel_id, 102, day(8, 1)))
            .await
            .unwrap();

        let customers = manager
            .regular_customers(seed.manager_id, seed.hotel_id, 5)
            .await
            .unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].customer_id, seed.customer_id);
        assert_eq!(customers[0].bookings, 3);
        assert_eq!(customers[1].customer_name, "Oscar");
        assert_eq!(customers[1].bookings, 1);

        let err = manager
            .regular_customers(seed.other_manager_id, seed.hotel_id, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, HotelError::NotAuthorized { .. }));
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn repair_request_should_link_manager() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        let request = RepairRequestBuilder::default()
            .hotel_id(seed.hotel_id)
            .room_number(102)
            .company_id(seed.company_id)
            .date(day(9, 1))
            .build()
            .unwrap();
        let repair = manager
            .place_repair_request(seed.manager_id, request)
            .await
            .unwrap();
        assert_eq!(repair.room_number, 102);
        assert_eq!(repair.repair_date, day(9, 1));

        let requester: i32 =
            sqlx::query_scalar("SELECT managerID FROM RoomRepairRequests WHERE repairID = $1")
                .bind(repair.repair_id)
                .fetch_one(&migrated_pool)
                .await
                .unwrap();
        assert_eq!(requester, seed.manager_id);

        let history = manager.repair_history(seed.manager_id).await.unwrap();
        assert_eq!(history, vec![repair]);
        assert!(manager
            .repair_history(seed.other_manager_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[sqlx_database_tester::test(pool(variable = "migrated_pool", migrations = "../migrations"))]
    async fn repair_request_for_foreign_hotel_should_be_rejected() {
        let seed = seed(&migrated_pool).await;
        let manager = HotelManager::new(migrated_pool.clone());

        let request = RepairRequestBuilder::default()
            .hotel_id(seed.far_hotel_id)
            .room_number(1)
            .company_id(seed.company_id)
            .date(day(9, 1))
            .build()
            .unwrap();
        let err = manager
            .place_repair_request(seed.manager_id, request)
            .await
            .unwrap_err();
        assert!(matches!(err, HotelError::NotAuthorized { .. }));

        let repairs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM RoomRepairs")
            .fetch_one(&migrated_pool)
            .await
            .unwrap();
        assert_eq!(repairs, 0);
    }
}
