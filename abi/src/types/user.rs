use std::{fmt, str::FromStr};

use crate::{types::validate_text, HotelError, Validator};

const MAX_NAME_LEN: usize = 30;
const MAX_PASSWORD_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Customer,
    Manager,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub user_type: UserType,
}

impl NewUser {
    /// Accounts created from the console are always customers.
    pub fn customer(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            user_type: UserType::Customer,
        }
    }
}

impl Validator for NewUser {
    fn validate(&self) -> Result<(), HotelError> {
        validate_text("name", &self.name, MAX_NAME_LEN)?;
        validate_text("password", &self.password, MAX_PASSWORD_LEN)?;
        Ok(())
    }
}

impl FromStr for UserType {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "manager" => Ok(Self::Manager),
            _ => Err(HotelError::InvalidUserType(s.to_string())),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Customer => write!(f, "Customer"),
            UserType::Manager => write!(f, "Manager"),
        }
    }
}
