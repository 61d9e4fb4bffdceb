use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::fmt;
use std::str::FromStr;

use crate::error::BikeshareError;

// ── Selection menus ───────────────────────────────────────────────────────────

/// Every city the explorer has data for, in menu order.
pub const CITIES: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

/// Full English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How many leading months the source data covers and the month prompt offers.
pub const SELECTABLE_MONTHS: usize = 6;

/// ISO week order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of `month` (1-based), or `None` outside 1–12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).copied()
}

/// Full English name of a weekday, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ── City ──────────────────────────────────────────────────────────────────────

/// A city with a bikeshare trip file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Lowercase name as typed at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Source CSV file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(label)
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CITIES
            .into_iter()
            .find(|city| city.key() == wanted)
            .ok_or_else(|| BikeshareError::invalid_selection("city", s))
    }
}

// ── Filter selectors ──────────────────────────────────────────────────────────

/// Month selector: no constraint, or a single calendar month (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

impl MonthFilter {
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    /// Accepts `all` or one of the selectable month names, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES[..SELECTABLE_MONTHS]
            .iter()
            .position(|name| name.to_lowercase() == wanted)
            .map(|idx| MonthFilter::Month(idx as u32 + 1))
            .ok_or_else(|| BikeshareError::invalid_selection("month", s))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Month(m) => f.write_str(month_name(*m).unwrap_or("unknown")),
        }
    }
}

/// Day-of-week selector: no constraint, or a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    /// Compares weekday names case-insensitively, so `"MONDAY"` and `"Monday"`
    /// select the same trips.
    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => weekday_name(d).eq_ignore_ascii_case(weekday_name(weekday)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day).eq_ignore_ascii_case(wanted))
            .map(DayFilter::Day)
            .ok_or_else(|| BikeshareError::invalid_selection("day", s))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// One completed round of prompt answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filters {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// A single ride read from a city's trip file.
///
/// `month` and `weekday` are derived from `start_time` on construction and
/// cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    /// Rider gender; `None` for cities without the column or blank cells.
    pub gender: Option<String>,
    /// Rider birth year; `None` for cities without the column or blank cells.
    pub birth_year: Option<i32>,
    month: u32,
    weekday: Weekday,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: user_type.into(),
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
        }
    }

    /// Attach the optional rider demographics.
    pub fn with_demographics(mut self, gender: Option<String>, birth_year: Option<i32>) -> Self {
        self.gender = gender;
        self.birth_year = birth_year;
        self
    }

    /// Calendar month of the start time (1–12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of week of the start time.
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Hour of day of the start time (0–23).
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Trip length in fractional minutes (`end_time - start_time`).
    pub fn duration_minutes(&self) -> f64 {
        let delta = self.end_time - self.start_time;
        delta.num_milliseconds() as f64 / 60_000.0
    }

    /// Start and end station joined as `"{start} - {end}"`.
    pub fn route(&self) -> String {
        format!("{} - {}", self.start_station, self.end_station)
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Whether a city's trip file carries the `Gender` and `Birth Year` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemographicColumns {
    /// Only `User Type` is available.
    Basic,
    /// `Gender` and `Birth Year` are both present.
    Complete,
}

/// Every trip loaded for one city, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    city: City,
    columns: DemographicColumns,
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(city: City, columns: DemographicColumns, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            columns,
            records,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn columns(&self) -> DemographicColumns {
        self.columns
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
