//! Console layer for the bikeshare explorer.
//!
//! Prompts for the round's filters, pages through raw trips, and prints the
//! four reports. Everything is written against `BufRead` / `Write` so the
//! same code drives stdin/stdout and in-memory buffers.

pub mod pager;
pub mod prompt;
pub mod report;

pub use bikeshare_core as core;
