mod conflict;

use thiserror::Error;

pub use conflict::*;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date format! Please enter as 'MM-dd-yyyy'.")]
    InvalidDate(String),

    #[error("invalid user type: {0}")]
    InvalidUserType(String),

    #[error("Invalid user id or password.")]
    InvalidCredentials,

    #[error("You do not manage this hotel.")]
    NotAuthorized { manager_id: i32, hotel_id: i32 },

    #[error("Room {room_number} not found in hotel {hotel_id}.")]
    RoomNotFound { hotel_id: i32, room_number: i32 },

    #[error("The room is not available on the selected date.")]
    RoomNotAvailable(BookingConflictInfo),

    #[error("unsupported column type: {0}")]
    UnsupportedColumn(String),

    #[error("db error: {0}")]
    DbError(sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed")]
    InputClosed,

    #[error("Not Found Row")]
    NotFoundRow,
}

/// Coarse grouping the console uses to decide how to report an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Unauthorized,
    NotFound,
    Conflict,
    DataAccess,
    Terminal,
}

impl HotelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::InvalidDate(_) | Self::InvalidUserType(_) => {
                ErrorKind::Input
            }
            Self::InvalidCredentials | Self::NotAuthorized { .. } => ErrorKind::Unauthorized,
            Self::RoomNotFound { .. } | Self::NotFoundRow => ErrorKind::NotFound,
            Self::RoomNotAvailable(_) => ErrorKind::Conflict,
            Self::DbError(_) | Self::UnsupportedColumn(_) => ErrorKind::DataAccess,
            Self::Io(_) | Self::InputClosed => ErrorKind::Terminal,
        }
    }
}

impl PartialEq for HotelError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // driver and io errors carry no comparable payload
            (Self::DbError(_), Self::DbError(_)) => true,
            (Self::Io(v1), Self::Io(v2)) => v1.kind() == v2.kind(),
            (Self::InvalidInput(v1), Self::InvalidInput(v2)) => v1 == v2,
            (Self::InvalidDate(v1), Self::InvalidDate(v2)) => v1 == v2,
            (Self::InvalidUserType(v1), Self::InvalidUserType(v2)) => v1 == v2,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (
                Self::NotAuthorized {
                    manager_id: m1,
                    hotel_id: h1,
                },
                Self::NotAuthorized {
                    manager_id: m2,
                    hotel_id: h2,
                },
            ) => m1 == m2 && h1 == h2,
            (
                Self::RoomNotFound {
                    hotel_id: h1,
                    room_number: r1,
                },
                Self::RoomNotFound {
                    hotel_id: h2,
                    room_number: r2,
                },
            ) => h1 == h2 && r1 == r2,
            (Self::RoomNotAvailable(v1), Self::RoomNotAvailable(v2)) => v1 == v2,
            (Self::UnsupportedColumn(v1), Self::UnsupportedColumn(v2)) => v1 == v2,
            (Self::InputClosed, Self::InputClosed) => true,
            (Self::NotFoundRow, Self::NotFoundRow) => true,
            _ => false,
        }
    }
}

impl From<sqlx::Error> for HotelError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(e) => {
                let info = e
                    .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
                    .and_then(|err| match (err.code(), err.table()) {
                        ("23505", Some("roombookings")) => {
                            Some(err.detail().unwrap_or_default().parse())
                        }
                        _ => None,
                    });
                match info {
                    Some(Ok(info)) => Self::RoomNotAvailable(info),
                    _ => Self::DbError(sqlx::Error::Database(e)),
                }
            }
            sqlx::Error::RowNotFound => Self::NotFoundRow,
            _ => Self::DbError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_should_be_classified() {
        assert_eq!(
            HotelError::InvalidDate("13-01-2023".into()).kind(),
            ErrorKind::Input
        );
        assert_eq!(
            HotelError::NotAuthorized {
                manager_id: 1,
                hotel_id: 2
            }
            .kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            HotelError::DbError(sqlx::Error::PoolClosed).kind(),
            ErrorKind::DataAccess
        );
        assert_eq!(HotelError::InputClosed.kind(), ErrorKind::Terminal);
    }

    #[test]
    fn row_not_found_should_convert() {
        assert_eq!(
            HotelError::from(sqlx::Error::RowNotFound),
            HotelError::NotFoundRow
        );
        assert_eq!(
            HotelError::from(sqlx::Error::PoolTimedOut),
            HotelError::DbError(sqlx::Error::PoolTimedOut)
        );
    }

    #[test]
    fn not_authorized_message_should_be_user_facing() {
        let err = HotelError::NotAuthorized {
            manager_id: 3,
            hotel_id: 9,
        };
        assert_eq!(err.to_string(), "You do not manage this hotel.");
    }
}
