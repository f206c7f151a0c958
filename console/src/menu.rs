use std::io::{BufRead, Write};

use abi::{ErrorKind, HotelError, UserType};
use tracing::warn;

use crate::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    Authenticated { user_id: i32, role: UserType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    CreateUser,
    LogIn,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChoice {
    ViewHotels,
    ViewRooms,
    BookRoom,
    RecentBookings,
    UpdateRoom,
    RecentUpdates,
    HotelBookings,
    RegularCustomers,
    PlaceRepairRequest,
    RepairHistory,
    LogOut,
}

impl MainChoice {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::CreateUser),
            2 => Some(Self::LogIn),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

impl SessionChoice {
    /// Manager-only codes are unrecognized for customers.
    pub fn from_code(code: i32, role: UserType) -> Option<Self> {
        let choice = match code {
            1 => Self::ViewHotels,
            2 => Self::ViewRooms,
            3 => Self::BookRoom,
            4 => Self::RecentBookings,
            5 => Self::UpdateRoom,
            6 => Self::RecentUpdates,
            7 => Self::HotelBookings,
            8 => Self::RegularCustomers,
            9 => Self::PlaceRepairRequest,
            10 => Self::RepairHistory,
            20 => Self::LogOut,
            _ => return None,
        };

        match (role, choice.is_manager_only()) {
            (UserType::Customer, true) => None,
            _ => Some(choice),
        }
    }

    fn is_manager_only(&self) -> bool {
        !matches!(
            self,
            Self::ViewHotels
                | Self::ViewRooms
                | Self::BookRoom
                | Self::RecentBookings
                | Self::LogOut
        )
    }
}

const MAIN_MENU: &[&str] = &["MAIN MENU", "---------", "1. Create user", "2. Log in", "9. < EXIT"];

const CUSTOMER_MENU: &[&str] = &[
    "           MAIN MENU              ",
    "----------------------------------",
    "1. View Hotels within {distance} units",
    "2. View Rooms",
    "3. Book a Room",
    "4. View recent booking history",
    "----------------------------------",
    "20. Log out",
];

const MANAGER_MENU: &[&str] = &[
    "                  MAIN MENU                   ",
    "----------------------------------------------",
    "1. View Hotels within {distance} units",
    "2. View Rooms",
    "3. Book a Room",
    "4. View recent booking history",
    "5. Update Room Information",
    "6. View {limit} recent Room Updates Info",
    "7. View booking history of the hotel",
    "8. View {limit} regular Customers",
    "9. Place room repair Request to a company",
    "10. View room repair Requests history",
    "----------------------------------------------",
    "20. Log out",
];

impl<'a, R: BufRead, W: Write + Send, E: Write> Console<'a, R, W, E> {
    /// Drive the menus until the user exits. Only terminal errors
    /// (I/O failure, closed input) end the loop early.
    pub async fn run(&mut self) -> Result<(), HotelError> {
        let mut state = MenuState::MainMenu;
        loop {
            state = match state {
                MenuState::MainMenu => match self.main_menu().await? {
                    Some(state) => state,
                    None => return Ok(()),
                },
                MenuState::Authenticated { user_id, role } => {
                    self.session_menu(user_id, role).await?
                }
            };
        }
    }

    /// One round of the main menu, `None` means exit.
    async fn main_menu(&mut self) -> Result<Option<MenuState>, HotelError> {
        self.print_menu(MAIN_MENU)?;
        let state = match MainChoice::from_code(self.term.read_choice()?) {
            Some(MainChoice::CreateUser) => {
                let result = self.create_user().await;
                self.report(result)?;
                MenuState::MainMenu
            }
            Some(MainChoice::LogIn) => {
                let result = self.log_in().await;
                self.report(result)?.unwrap_or(MenuState::MainMenu)
            }
            Some(MainChoice::Exit) => return Ok(None),
            None => {
                self.term.say("Unrecognized choice!")?;
                MenuState::MainMenu
            }
        };
        Ok(Some(state))
    }

    async fn session_menu(&mut self, user_id: i32, role: UserType) -> Result<MenuState, HotelError> {
        self.print_menu(match role {
            UserType::Customer => CUSTOMER_MENU,
            UserType::Manager => MANAGER_MENU,
        })?;

        let code = self.term.read_choice()?;
        let result = match SessionChoice::from_code(code, role) {
            Some(SessionChoice::ViewHotels) => self.view_hotels().await,
            Some(SessionChoice::ViewRooms) => self.view_rooms().await,
            Some(SessionChoice::BookRoom) => self.book_room(user_id).await,
            Some(SessionChoice::RecentBookings) => self.recent_bookings(user_id).await,
            Some(SessionChoice::UpdateRoom) => self.update_room(user_id).await,
            Some(SessionChoice::RecentUpdates) => self.recent_updates(user_id).await,
            Some(SessionChoice::HotelBookings) => self.hotel_bookings(user_id).await,
            Some(SessionChoice::RegularCustomers) => self.regular_customers(user_id).await,
            Some(SessionChoice::PlaceRepairRequest) => self.place_repair_request(user_id).await,
            Some(SessionChoice::RepairHistory) => self.repair_history(user_id).await,
            Some(SessionChoice::LogOut) => return Ok(MenuState::MainMenu),
            None => self.term.say("Unrecognized choice!"),
        };
        self.report(result)?;

        Ok(MenuState::Authenticated { user_id, role })
    }

    fn print_menu(&mut self, lines: &[&str]) -> Result<(), HotelError> {
        let distance = self.config.distance_threshold.to_string();
        let limit = self.config.history_limit.to_string();
        for line in lines {
            self.term
                .say(line.replace("{distance}", &distance).replace("{limit}", &limit))?;
        }
        Ok(())
    }

    /// Print what went wrong and carry on, unless the console itself is gone.
    /// Refusals are answers and go to the output, failures go to the error stream.
    fn report<T>(&mut self, result: Result<T, HotelError>) -> Result<Option<T>, HotelError> {
        let err = match result {
            Ok(v) => return Ok(Some(v)),
            Err(err) => err,
        };

        match err.kind() {
            ErrorKind::Terminal => return Err(err),
            ErrorKind::DataAccess => {
                warn!(error = %err, "handler failed");
                self.term.complain(err.to_string())?;
            }
            ErrorKind::Input => self.term.complain(err.to_string())?,
            ErrorKind::Unauthorized | ErrorKind::NotFound | ErrorKind::Conflict => {
                self.term.say(err.to_string())?
            }
        }
        Ok(None)
    }
}
