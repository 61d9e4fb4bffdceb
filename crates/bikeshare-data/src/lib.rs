//! Data layer for the bikeshare explorer.
//!
//! Loads a city's trip file, narrows it to the selected month and weekday,
//! and computes the travel-time, station, duration and user reports.

pub mod filter;
pub mod reader;
pub mod stats;

pub use bikeshare_core as core;
