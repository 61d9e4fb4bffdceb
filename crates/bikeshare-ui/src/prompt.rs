//! Console prompts for choosing a city, month and weekday.
//!
//! Every question is asked through [`Console::ask_until`], which re-prompts
//! until the answer parses. End of input is reported as
//! [`io::ErrorKind::UnexpectedEof`] so the caller can stop cleanly.

use std::io::{self, BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, DayFilter, Filters, MonthFilter, CITIES};
use tracing::debug;

/// Separator printed between sections.
pub const RULE: &str = "----------------------------------------";

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";

const MONTH_QUESTION: &str = "Enter month name (all, january, february ... june): ";
const DAY_QUESTION: &str = "Enter day of week (all, monday, tuesday ... sunday): ";
const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Parse a `yes` / `no` answer, ignoring case and surrounding whitespace.
pub fn parse_yes_no(answer: &str) -> Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(BikeshareError::invalid_selection("answer", answer)),
    }
}

fn city_question() -> String {
    let names: Vec<&str> = CITIES.iter().map(|c| c.key()).collect();
    format!("Enter name of city ({}): ", names.join(", "))
}

// ── Console ───────────────────────────────────────────────────────────────────

/// A question/answer channel over any line-oriented input and output.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for report output between questions.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the console and hand back its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask `question` until `parse` accepts the answer.
    ///
    /// Rejected answers print the parse error and ask again, with no limit on
    /// the number of attempts.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> io::Result<T> {
        loop {
            let answer = self.read_answer(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    debug!("Rejected answer: {}", err);
                    writeln!(self.output, "{}. Please try again.", err)?;
                }
            }
        }
    }

    /// Ask a yes/no question, re-prompting on anything else.
    pub fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        self.ask_until(question, parse_yes_no)
    }

    /// Collect city, month and weekday for one round.
    pub fn get_filters(&mut self) -> io::Result<Filters> {
        writeln!(self.output, "{}", GREETING)?;

        let city = self.ask_until(&city_question(), str::parse::<City>)?;
        let month = self.ask_until(MONTH_QUESTION, str::parse::<MonthFilter>)?;
        let day = self.ask_until(DAY_QUESTION, str::parse::<DayFilter>)?;

        writeln!(self.output, "{}", RULE)?;
        Ok(Filters { city, month, day })
    }

    /// Offer another round. Only an explicit `yes` restarts.
    pub fn ask_restart(&mut self) -> io::Result<bool> {
        let answer = self.read_answer(RESTART_QUESTION)?;
        Ok(answer.trim().eq_ignore_ascii_case("yes"))
    }

    fn read_answer(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
