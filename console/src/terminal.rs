use std::io::{BufRead, Write};

use abi::{parse_date, HotelError};
use chrono::NaiveDate;

const NO_INPUT: &str = "No input. Please enter again!";
const INVALID_INPUT: &str = "Invalid input. Please enter again!";

/// Line oriented console I/O: prompts go to `output`, failures to `errors`,
/// answers come from `input`.
pub struct Terminal<R, W, E> {
    input: R,
    pub(crate) output: W,
    errors: E,
}

impl<R: BufRead, W: Write, E: Write> Terminal<R, W, E> {
    pub fn new(input: R, output: W, errors: E) -> Self {
        Self {
            input,
            output,
            errors,
        }
    }

    pub fn into_writers(self) -> (W, E) {
        (self.output, self.errors)
    }

    /// Print a line.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<(), HotelError> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print a line on the error stream.
    pub fn complain(&mut self, line: impl AsRef<str>) -> Result<(), HotelError> {
        writeln!(self.errors, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print without a newline and flush, so the answer goes on the same line.
    pub fn prompt(&mut self, text: &str) -> Result<(), HotelError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Next line without its line ending. `InputClosed` at end of input.
    pub fn read_line(&mut self) -> Result<String, HotelError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(HotelError::InputClosed);
        }

        let len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(len);
        Ok(line)
    }

    pub fn ask(&mut self, text: &str) -> Result<String, HotelError> {
        self.prompt(text)?;
        self.read_line()
    }

    /// Keeps reading until the line is a non-empty run of ASCII digits that fits an `i32`.
    pub fn read_int(&mut self) -> Result<i32, HotelError> {
        loop {
            let line = self.read_line()?;
            if line.is_empty() {
                self.say(NO_INPUT)?;
                continue;
            }
            if !line.bytes().all(|b| b.is_ascii_digit()) {
                self.say(INVALID_INPUT)?;
                continue;
            }
            match line.parse() {
                Ok(v) => return Ok(v),
                Err(_) => self.say(INVALID_INPUT)?,
            }
        }
    }

    pub fn ask_int(&mut self, text: &str) -> Result<i32, HotelError> {
        self.prompt(text)?;
        self.read_int()
    }

    /// Keeps reading until the line parses as a finite number.
    pub fn read_float(&mut self) -> Result<f64, HotelError> {
        loop {
            let line = self.read_line()?;
            match line.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => return Ok(v),
                _ if line.trim().is_empty() => self.say(NO_INPUT)?,
                _ => self.say(INVALID_INPUT)?,
            }
        }
    }

    pub fn ask_float(&mut self, text: &str) -> Result<f64, HotelError> {
        self.prompt(text)?;
        self.read_float()
    }

    /// A single `MM-dd-yyyy` attempt; a malformed date is an error, not a re-prompt.
    pub fn ask_date(&mut self, text: &str) -> Result<NaiveDate, HotelError> {
        let line = self.ask(text)?;
        parse_date(&line)
    }

    pub fn read_choice(&mut self) -> Result<i32, HotelError> {
        self.ask_int("Please make your choice: ")
    }
}
