//! The four trip reports: travel times, stations, durations and users.
//!
//! Each function reads only the [`Selection`] it is given, so they can run in
//! any order or on their own. Every report needs at least one trip and
//! returns [`BikeshareError::EmptyResult`] otherwise.

use bikeshare_core::calculations::{frequency_table, mode};
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::DemographicColumns;
use chrono::Weekday;

use crate::filter::Selection;

// ── Report types ──────────────────────────────────────────────────────────────

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// Calendar month number (1–12).
    pub popular_month: u32,
    pub popular_weekday: Weekday,
    /// Hour of day (0–23).
    pub popular_hour: u32,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub popular_start_station: String,
    pub popular_end_station: String,
    /// Formatted as `"{start} - {end}"`.
    pub popular_route: String,
}

/// Total and average trip duration, in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_minutes: f64,
    pub mean_minutes: f64,
}

/// Earliest, most recent and most common rider birth year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Gender and birth-year breakdown, only for cities that record them.
#[derive(Debug, Clone, PartialEq)]
pub struct Demographics {
    pub gender_counts: Vec<(String, usize)>,
    /// `None` when no selected trip has a birth year.
    pub birth_years: Option<BirthYearStats>,
}

/// Rider breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Count per user type, most common first.
    pub user_type_counts: Vec<(String, usize)>,
    /// `None` for cities without `Gender` / `Birth Year` columns.
    pub demographics: Option<Demographics>,
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// Most common month, weekday and start hour.
pub fn time_stats(selection: &Selection<'_>) -> Result<TimeStats> {
    let popular_month = mode(selection.records().map(|t| t.month()))
        .ok_or(BikeshareError::EmptyResult("most common month"))?;
    let popular_weekday = mode(selection.records().map(|t| t.weekday()))
        .ok_or(BikeshareError::EmptyResult("most common day of week"))?;
    let popular_hour = mode(selection.records().map(|t| t.start_hour()))
        .ok_or(BikeshareError::EmptyResult("most common start hour"))?;

    Ok(TimeStats {
        popular_month,
        popular_weekday,
        popular_hour,
    })
}

/// Most common start station, end station and start/end combination.
pub fn station_stats(selection: &Selection<'_>) -> Result<StationStats> {
    let popular_start_station = mode(selection.records().map(|t| t.start_station.as_str()))
        .ok_or(BikeshareError::EmptyResult("most common start station"))?
        .to_string();
    let popular_end_station = mode(selection.records().map(|t| t.end_station.as_str()))
        .ok_or(BikeshareError::EmptyResult("most common end station"))?
        .to_string();
    let popular_route = mode(selection.records().map(|t| t.route()))
        .ok_or(BikeshareError::EmptyResult("most common trip"))?;

    Ok(StationStats {
        popular_start_station,
        popular_end_station,
        popular_route,
    })
}

/// Total and mean trip duration in fractional minutes.
pub fn trip_duration_stats(selection: &Selection<'_>) -> Result<DurationStats> {
    if selection.is_empty() {
        return Err(BikeshareError::EmptyResult("mean trip duration"));
    }

    let trip_count = selection.len();
    let total_minutes: f64 = selection.records().map(|t| t.duration_minutes()).sum();

    Ok(DurationStats {
        trip_count,
        total_minutes,
        mean_minutes: total_minutes / trip_count as f64,
    })
}

/// Counts per user type, plus gender and birth-year figures when the city's
/// file has those columns.
pub fn user_stats(selection: &Selection<'_>) -> Result<UserStats> {
    if selection.is_empty() {
        return Err(BikeshareError::EmptyResult("user statistics"));
    }

    let user_type_counts = owned_counts(frequency_table(
        selection
            .records()
            .map(|t| t.user_type.as_str())
            .filter(|u| !u.is_empty()),
    ));

    let demographics = match selection.columns() {
        DemographicColumns::Basic => None,
        DemographicColumns::Complete => Some(demographics(selection)),
    };

    Ok(UserStats {
        user_type_counts,
        demographics,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn demographics(selection: &Selection<'_>) -> Demographics {
    let gender_counts = owned_counts(frequency_table(
        selection.records().filter_map(|t| t.gender.as_deref()),
    ));

    let years: Vec<i32> = selection.records().filter_map(|t| t.birth_year).collect();
    let birth_years = match (years.iter().min(), years.iter().max(), mode(years.iter().copied())) {
        (Some(&earliest), Some(&most_recent), Some(most_common)) => Some(BirthYearStats {
            earliest,
            most_recent,
            most_common,
        }),
        _ => None,
    };

    Demographics {
        gender_counts,
        birth_years,
    }
}

fn owned_counts(table: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    table
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::apply_filters;
    use bikeshare_core::models::{City, Dataset, DayFilter, MonthFilter, TripRecord};
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn trip(start: &str, end: &str, from: &str, to: &str, user: &str) -> TripRecord {
        TripRecord::new(ts(start), ts(end), from, to, user)
    }

    fn basic(records: Vec<TripRecord>) -> Dataset {
        Dataset::new(City::Washington, DemographicColumns::Basic, records)
    }

    fn complete(records: Vec<TripRecord>) -> Dataset {
        Dataset::new(City::Chicago, DemographicColumns::Complete, records)
    }

    // ── time_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_time_stats_single_record() {
        // 2017-03-15 was a Wednesday.
        let dataset = basic(vec![trip(
            "2017-03-15T17:45:00",
            "2017-03-15T18:00:00",
            "A",
            "B",
            "Subscriber",
        )]);
        let stats = time_stats(&Selection::all(&dataset)).expect("stats");
        assert_eq!(stats.popular_month, 3);
        assert_eq!(stats.popular_weekday, Weekday::Wed);
        assert_eq!(stats.popular_hour, 17);
    }

    #[test]
    fn test_time_stats_mode() {
        let dataset = basic(vec![
            trip("2017-01-02T08:00:00", "2017-01-02T08:10:00", "A", "B", "Subscriber"),
            trip("2017-02-06T08:30:00", "2017-02-06T08:40:00", "A", "B", "Subscriber"),
            trip("2017-02-07T17:00:00", "2017-02-07T17:10:00", "A", "B", "Subscriber"),
        ]);
        let stats = time_stats(&Selection::all(&dataset)).expect("stats");
        assert_eq!(stats.popular_month, 2);
        assert_eq!(stats.popular_weekday, Weekday::Mon);
        assert_eq!(stats.popular_hour, 8);
    }

    #[test]
    fn test_time_stats_tie_goes_to_first_row() {
        let dataset = basic(vec![
            trip("2017-05-01T10:00:00", "2017-05-01T10:10:00", "A", "B", "Subscriber"),
            trip("2017-04-01T09:00:00", "2017-04-01T09:10:00", "A", "B", "Subscriber"),
        ]);
        let stats = time_stats(&Selection::all(&dataset)).expect("stats");
        assert_eq!(stats.popular_month, 5);
        assert_eq!(stats.popular_hour, 10);
    }

    #[test]
    fn test_time_stats_empty() {
        let dataset = basic(Vec::new());
        let err = time_stats(&Selection::all(&dataset)).unwrap_err();
        assert!(matches!(err, BikeshareError::EmptyResult(_)));
    }

    // ── station_stats ─────────────────────────────────────────────────────────

    #[test]
    fn test_station_stats_popular_route() {
        let dataset = basic(vec![
            trip("2017-01-01T08:00:00", "2017-01-01T08:10:00", "A", "B", "Subscriber"),
            trip("2017-01-01T09:00:00", "2017-01-01T09:10:00", "A", "B", "Subscriber"),
            trip("2017-01-01T10:00:00", "2017-01-01T10:10:00", "A", "C", "Subscriber"),
        ]);
        let stats = station_stats(&Selection::all(&dataset)).expect("stats");
        assert_eq!(stats.popular_start_station, "A");
        assert_eq!(stats.popular_end_station, "B");
        assert_eq!(stats.popular_route, "A - B");
    }

    #[test]
    fn test_station_stats_route_differs_from_station_modes() {
        let dataset = basic(vec![
            trip("2017-01-01T08:00:00", "2017-01-01T08:10:00", "X", "Y", "Subscriber"),
            trip("2017-01-01T09:00:00", "2017-01-01T09:10:00", "X", "Y", "Subscriber"),
            trip("2017-01-01T10:00:00", "2017-01-01T10:10:00", "Z", "W", "Subscriber"),
            trip("2017-01-01T11:00:00", "2017-01-01T11:10:00", "Z", "Q", "Subscriber"),
            trip("2017-01-01T12:00:00", "2017-01-01T12:10:00", "Z", "R", "Subscriber"),
        ]);
        let stats = station_stats(&Selection::all(&dataset)).expect("stats");
        assert_eq!(stats.popular_start_station, "Z");
        assert_eq!(stats.popular_end_station, "Y");
        assert_eq!(stats.popular_route, "X - Y");
    }

    #[test]
    fn test_station_stats_empty() {
        let dataset = basic(Vec::new());
        assert!(matches!(
            station_stats(&Selection::all(&dataset)),
            Err(BikeshareError::EmptyResult(_))
        ));
    }

    // ── trip_duration_stats ───────────────────────────────────────────────────

    #[test]
    fn test_duration_thirty_minutes() {
        let dataset = basic(vec![trip(
            "2021-01-01T00:00:00",
            "2021-01-01T00:30:00",
            "A",
            "B",
            "Customer",
        )]);
        let stats = trip_duration_stats(&Selection::all(&dataset)).expect("stats");
        assert_eq!(stats.trip_count, 1);
        assert_eq!(stats.total_minutes, 30.0);
        assert_eq!(stats.mean_minutes, 30.0);
    }

    #[test]
    fn test_duration_total_and_mean() {
        let dataset = basic(vec![
            trip("2017-01-01T08:00:00", "2017-01-01T08:10:30", "A", "B", "Subscriber"),
            trip("2017-01-01T09:00:00", "2017-01-01T09:20:00", "A", "B", "Subscriber"),
            trip("2017-01-01T10:00:00", "2017-01-01T10:05:00", "A", "B", "Subscriber"),
        ]);
        let stats = trip_duration_stats(&Selection::all(&dataset)).expect("stats");
        assert_eq!(stats.trip_count, 3);
        assert!((stats.total_minutes - 35.5).abs() < 1e-9);
        assert!((stats.mean_minutes - 35.5 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_duration_empty_selection() {
        let dataset = basic(vec![trip(
            "2017-01-01T08:00:00",
            "2017-01-01T08:10:00",
            "A",
            "B",
            "Subscriber",
        )]);
        let selection = apply_filters(&dataset, MonthFilter::Month(6), DayFilter::All);
        let err = trip_duration_stats(&selection).unwrap_err();
        assert!(matches!(err, BikeshareError::EmptyResult("mean trip duration")));
    }

    // ── user_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_user_stats_basic_omits_demographics() {
        let dataset = basic(vec![
            trip("2017-01-01T08:00:00", "2017-01-01T08:10:00", "A", "B", "Subscriber"),
            trip("2017-01-01T09:00:00", "2017-01-01T09:10:00", "A", "B", "Customer"),
            trip("2017-01-01T10:00:00", "2017-01-01T10:10:00", "A", "B", "Subscriber"),
        ]);
        let stats = user_stats(&Selection::all(&dataset)).expect("stats");
        assert_eq!(
            stats.user_type_counts,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
        assert!(stats.demographics.is_none());
    }

    #[test]
    fn test_user_stats_complete_birth_years() {
        let rows = [
            ("Male", 1990),
            ("Female", 1985),
            ("Male", 1990),
            ("Female", 2000),
        ];
        let records = rows
            .iter()
            .map(|(gender, year)| {
                trip("2017-01-01T08:00:00", "2017-01-01T08:10:00", "A", "B", "Subscriber")
                    .with_demographics(Some(gender.to_string()), Some(*year))
            })
            .collect();
        let dataset = complete(records);

        let stats = user_stats(&Selection::all(&dataset)).expect("stats");
        let demographics = stats.demographics.expect("demographics");
        assert_eq!(
            demographics.gender_counts,
            vec![("Male".to_string(), 2), ("Female".to_string(), 2)]
        );
        assert_eq!(
            demographics.birth_years,
            Some(BirthYearStats {
                earliest: 1985,
                most_recent: 2000,
                most_common: 1990,
            })
        );
    }

    #[test]
    fn test_user_stats_complete_skips_blank_cells() {
        let dataset = complete(vec![
            trip("2017-01-01T08:00:00", "2017-01-01T08:10:00", "A", "B", "Customer"),
            trip("2017-01-01T09:00:00", "2017-01-01T09:10:00", "A", "B", "Subscriber")
                .with_demographics(Some("Female".to_string()), None),
        ]);
        let stats = user_stats(&Selection::all(&dataset)).expect("stats");
        let demographics = stats.demographics.expect("demographics");
        assert_eq!(demographics.gender_counts, vec![("Female".to_string(), 1)]);
        assert!(demographics.birth_years.is_none());
    }

    #[test]
    fn test_user_stats_empty() {
        let dataset = complete(Vec::new());
        assert!(matches!(
            user_stats(&Selection::all(&dataset)),
            Err(BikeshareError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_single_record_modes_return_own_values() {
        let record = trip("2017-06-10T23:15:00", "2017-06-10T23:45:00", "Dock 1", "Dock 2", "Customer")
            .with_demographics(Some("Male".to_string()), Some(1979));
        let dataset = complete(vec![record.clone()]);
        let selection = Selection::all(&dataset);

        let times = time_stats(&selection).expect("time");
        assert_eq!(times.popular_month, record.month());
        assert_eq!(times.popular_weekday, record.weekday());
        assert_eq!(times.popular_hour, 23);

        let stations = station_stats(&selection).expect("stations");
        assert_eq!(stations.popular_start_station, "Dock 1");
        assert_eq!(stations.popular_end_station, "Dock 2");
        assert_eq!(stations.popular_route, "Dock 1 - Dock 2");

        let users = user_stats(&selection).expect("users");
        assert_eq!(users.user_type_counts, vec![("Customer".to_string(), 1)]);
        let years = users.demographics.and_then(|d| d.birth_years).expect("years");
        assert_eq!(years.most_common, 1979);
        assert_eq!(years.earliest, 1979);
        assert_eq!(years.most_recent, 1979);
    }
}
