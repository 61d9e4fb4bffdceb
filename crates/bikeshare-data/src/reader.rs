//! Trip file loading for the bikeshare explorer.
//!
//! Reads one city's CSV export and converts every row into a [`TripRecord`]
//! with its month and weekday already derived.

use std::io::Read;
use std::path::Path;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, Dataset, DemographicColumns, TripRecord};
use bikeshare_core::time_utils::{parse_birth_year, parse_timestamp};
use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info};

/// Headers every trip file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "End Time",
    "Start Station",
    "End Station",
    "User Type",
];

const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

// ── Raw row ───────────────────────────────────────────────────────────────────

/// One CSV row as it appears on disk; unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

impl RawTrip {
    /// Convert into a [`TripRecord`]; `row` is the 1-based data row number
    /// used in error messages.
    fn into_record(self, row: usize, columns: DemographicColumns) -> Result<TripRecord> {
        let start_time =
            parse_timestamp(&self.start_time).ok_or_else(|| BikeshareError::MalformedRecord {
                row,
                column: "Start Time",
                value: self.start_time.clone(),
            })?;
        let end_time =
            parse_timestamp(&self.end_time).ok_or_else(|| BikeshareError::MalformedRecord {
                row,
                column: "End Time",
                value: self.end_time.clone(),
            })?;

        let record = TripRecord::new(
            start_time,
            end_time,
            self.start_station,
            self.end_station,
            self.user_type,
        );

        Ok(match columns {
            DemographicColumns::Basic => record,
            DemographicColumns::Complete => {
                let gender = self.gender.filter(|g| !g.trim().is_empty());
                let birth_year = self.birth_year.as_deref().and_then(parse_birth_year);
                record.with_demographics(gender, birth_year)
            }
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every trip for `city` from the CSV file at `path`.
///
/// Fails on the first row whose start or end time cannot be parsed; there is
/// no partial result.
pub fn load_dataset(path: &Path, city: City) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_dataset(std::io::BufReader::new(file), city)?;

    info!(
        "Loaded {} trips for {} from {} ({:?} demographics)",
        dataset.len(),
        city,
        path.display(),
        dataset.columns()
    );

    Ok(dataset)
}

/// Parse trips for `city` from any CSV source.
pub fn read_dataset<R: Read>(source: R, city: City) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    check_required_columns(&headers)?;
    let columns = demographic_columns(&headers);

    let mut records: Vec<TripRecord> = Vec::new();
    for (idx, row) in reader.deserialize::<RawTrip>().enumerate() {
        let raw = row?;
        records.push(raw.into_record(idx + 1, columns)?);
    }

    debug!("Parsed {} rows for {}", records.len(), city);

    Ok(Dataset::new(city, columns, records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn check_required_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BikeshareError::MissingColumn(column));
        }
    }
    Ok(())
}

/// `Complete` only when both optional demographic headers are present.
fn demographic_columns(headers: &StringRecord) -> DemographicColumns {
    let has = |name: &str| headers.iter().any(|h| h == name);
    if has(GENDER_COLUMN) && has(BIRTH_YEAR_COLUMN) {
        DemographicColumns::Complete
    } else {
        DemographicColumns::Basic
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
