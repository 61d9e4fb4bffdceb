//! Domain types and shared helpers for the bikeshare explorer.
//!
//! Holds the city and filter-selector types, trip records and datasets, the
//! error type, command-line settings, timestamp parsing, frequency/mode
//! calculations and number formatting used by the data and UI crates.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};
