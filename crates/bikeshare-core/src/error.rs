use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare crates.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A source file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure itself is broken (unbalanced quotes, bad UTF-8, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column header is absent from the source file.
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A row's timestamp field could not be parsed.
    #[error("Malformed record at row {row}: invalid {column} \"{value}\"")]
    MalformedRecord {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// A statistic that needs at least one record was asked of an empty selection.
    #[error("No trips match the selected filters; cannot compute {0}")]
    EmptyResult(&'static str),

    /// A prompt answer is not one of the accepted values.
    #[error("Invalid {kind} \"{input}\"")]
    InvalidSelection { kind: &'static str, input: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BikeshareError {
    /// Shorthand for building an [`BikeshareError::InvalidSelection`].
    pub fn invalid_selection(kind: &'static str, input: &str) -> Self {
        Self::InvalidSelection {
            kind,
            input: input.to_string(),
        }
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
