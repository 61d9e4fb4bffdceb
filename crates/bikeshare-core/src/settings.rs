use clap::Parser;
use std::path::PathBuf;

use crate::error::{BikeshareError, Result};
use crate::models::City;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data interactively",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Raw rows shown per page (1-100)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub page_size: u16,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Path of `city`'s trip file inside the data directory.
    pub fn source_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    /// Rows per raw-data page.
    pub fn page_size(&self) -> usize {
        usize::from(self.page_size)
    }

    /// Check that the data directory exists before the first round starts.
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            return Err(BikeshareError::Config(format!(
                "data directory {} does not exist",
                self.data_dir.display()
            )));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
