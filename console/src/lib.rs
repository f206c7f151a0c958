use std::io::{BufRead, Write};

use abi::{ConsoleConfig, DbConfig, HotelError};
use hotel::HotelManager;

mod handlers;
mod menu;
mod terminal;

pub use menu::*;
pub use terminal::Terminal;

/// Everything a handler needs: the terminal, the database and the settings.
pub struct Console<'a, R, W, E> {
    manager: &'a HotelManager,
    term: Terminal<R, W, E>,
    config: ConsoleConfig,
}

impl<'a, R: BufRead, W: Write + Send, E: Write> Console<'a, R, W, E> {
    pub fn new(
        manager: &'a HotelManager,
        input: R,
        output: W,
        errors: E,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            manager,
            term: Terminal::new(input, output, errors),
            config,
        }
    }

    pub fn into_writers(self) -> (W, E) {
        self.term.into_writers()
    }
}

/// Open the connection, or explain on `errors` why it could not be opened.
pub async fn connect_or_report(
    config: &DbConfig,
    errors: &mut impl Write,
) -> Result<HotelManager, HotelError> {
    match HotelManager::from_config(config).await {
        Ok(manager) => Ok(manager),
        Err(e) => {
            writeln!(errors, "Error - Unable to Connect to Database: {}", e)?;
            writeln!(errors, "Make sure you started postgres on this machine")?;
            Err(e)
        }
    }
}
