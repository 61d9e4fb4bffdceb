//! Console rendering of the four trip reports.

use std::io::{self, Write};
use std::time::Instant;

use bikeshare_core::error::Result;
use bikeshare_core::formatting::{format_count, format_elapsed, format_hour, format_minutes};
use bikeshare_core::models::{month_name, weekday_name};
use bikeshare_data::filter::Selection;
use bikeshare_data::stats::{
    station_stats, time_stats, trip_duration_stats, user_stats, DurationStats, StationStats,
    TimeStats, UserStats,
};
use tracing::warn;

use crate::prompt::RULE;

/// Compute one report and print it between a heading and an elapsed-time line.
///
/// A failed computation prints its error in place of the figures; the
/// section still ends normally so later sections can run.
pub fn run_section<W: Write, T>(
    out: &mut W,
    heading: &str,
    compute: impl FnOnce() -> Result<T>,
    render: impl FnOnce(&mut W, &T) -> io::Result<()>,
) -> io::Result<()> {
    writeln!(out, "\n{}\n", heading)?;
    let start = Instant::now();

    match compute() {
        Ok(stats) => render(out, &stats)?,
        Err(err) => {
            warn!("{} failed: {}", heading, err);
            writeln!(out, "{}", err)?;
        }
    }

    writeln!(out, "\nThis took {} seconds.", format_elapsed(start.elapsed()))?;
    writeln!(out, "{}", RULE)
}

/// Print all four reports for `selection`, in the usual order.
pub fn print_reports<W: Write>(out: &mut W, selection: &Selection<'_>) -> io::Result<()> {
    run_section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        || time_stats(selection),
        write_time_stats,
    )?;
    run_section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        || station_stats(selection),
        write_station_stats,
    )?;
    run_section(
        out,
        "Calculating Trip Duration...",
        || trip_duration_stats(selection),
        write_duration_stats,
    )?;
    run_section(
        out,
        "Calculating User Stats...",
        || user_stats(selection),
        write_user_stats,
    )
}

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    writeln!(
        out,
        "Most common month: {}",
        month_name(stats.popular_month).unwrap_or("unknown")
    )?;
    writeln!(
        out,
        "Most common day of week: {}",
        weekday_name(stats.popular_weekday)
    )?;
    writeln!(
        out,
        "Most common start hour: {}",
        format_hour(stats.popular_hour)
    )
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(out, "Most common start station: {}", stats.popular_start_station)?;
    writeln!(out, "Most common end station: {}", stats.popular_end_station)?;
    writeln!(
        out,
        "Most common start and end station combination: {}",
        stats.popular_route
    )
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(out, "Trips: {}", format_count(stats.trip_count))?;
    writeln!(out, "Total travel time: {}", format_minutes(stats.total_minutes))?;
    writeln!(out, "Mean travel time: {}", format_minutes(stats.mean_minutes))
}

pub fn write_user_stats<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    writeln!(out, "Count per user type:")?;
    write_counts(out, &stats.user_type_counts)?;

    // Cities without demographic columns simply skip this part.
    let Some(demographics) = &stats.demographics else {
        return Ok(());
    };

    writeln!(out, "\nCount per gender:")?;
    write_counts(out, &demographics.gender_counts)?;

    match &demographics.birth_years {
        Some(years) => {
            writeln!(out, "\nEarliest year of birth: {}", years.earliest)?;
            writeln!(out, "Most recent year of birth: {}", years.most_recent)?;
            writeln!(out, "Most common year of birth: {}", years.most_common)
        }
        None => writeln!(out, "\nNo birth year data for the selected trips."),
    }
}

fn write_counts<W: Write>(out: &mut W, counts: &[(String, usize)]) -> io::Result<()> {
    let width = counts.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, count) in counts {
        writeln!(out, "  {:<width$}  {}", label, format_count(*count), width = width)?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::error::BikeshareError;
    use bikeshare_core::models::{
        City, Dataset, DayFilter, DemographicColumns, MonthFilter, TripRecord,
    };
    use bikeshare_data::filter::apply_filters;
    use bikeshare_data::stats::{BirthYearStats, Demographics};
    use chrono::{NaiveDateTime, Weekday};

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn render<T>(f: impl FnOnce(&mut Vec<u8>, &T) -> io::Result<()>, stats: &T) -> String {
        let mut buf = Vec::new();
        f(&mut buf, stats).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn test_write_time_stats() {
        let out = render(
            write_time_stats,
            &TimeStats {
                popular_month: 6,
                popular_weekday: Weekday::Wed,
                popular_hour: 17,
            },
        );
        assert!(out.contains("Most common month: June"));
        assert!(out.contains("Most common day of week: Wednesday"));
        assert!(out.contains("Most common start hour: 17:00"));
    }

    #[test]
    fn test_write_duration_stats_rounds_mean() {
        let out = render(
            write_duration_stats,
            &DurationStats {
                trip_count: 3,
                total_minutes: 35.5,
                mean_minutes: 35.5 / 3.0,
            },
        );
        assert!(out.contains("Total travel time: 35.50 minutes"));
        assert!(out.contains("Mean travel time: 11.83 minutes"));
    }

    #[test]
    fn test_write_user_stats_without_demographics() {
        let out = render(
            write_user_stats,
            &UserStats {
                user_type_counts: vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)],
                demographics: None,
            },
        );
        assert!(out.contains("Subscriber  2"));
        assert!(out.contains("Customer    1"));
        assert!(!out.contains("gender"));
        assert!(!out.contains("year of birth"));
    }

    #[test]
    fn test_write_user_stats_with_demographics() {
        let out = render(
            write_user_stats,
            &UserStats {
                user_type_counts: vec![("Subscriber".to_string(), 4)],
                demographics: Some(Demographics {
                    gender_counts: vec![("Male".to_string(), 3), ("Female".to_string(), 1)],
                    birth_years: Some(BirthYearStats {
                        earliest: 1985,
                        most_recent: 2000,
                        most_common: 1990,
                    }),
                }),
            },
        );
        assert!(out.contains("Count per gender:"));
        assert!(out.contains("Earliest year of birth: 1985"));
        assert!(out.contains("Most recent year of birth: 2000"));
        assert!(out.contains("Most common year of birth: 1990"));
    }

    #[test]
    fn test_run_section_prints_error_and_timing() {
        let mut buf = Vec::new();
        run_section(
            &mut buf,
            "Calculating Trip Duration...",
            || -> Result<DurationStats> { Err(BikeshareError::EmptyResult("mean trip duration")) },
            write_duration_stats,
        )
        .expect("section");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("Calculating Trip Duration..."));
        assert!(out.contains("cannot compute mean trip duration"));
        assert!(out.contains("This took "));
        assert!(out.trim_end().ends_with(RULE));
    }

    #[test]
    fn test_print_reports_full_round() {
        let dataset = Dataset::new(
            City::Washington,
            DemographicColumns::Basic,
            vec![
                TripRecord::new(
                    ts("2017-01-02 08:00:00"),
                    ts("2017-01-02 08:30:00"),
                    "A",
                    "B",
                    "Subscriber",
                ),
                TripRecord::new(
                    ts("2017-01-09 08:15:00"),
                    ts("2017-01-09 08:25:00"),
                    "A",
                    "B",
                    "Customer",
                ),
            ],
        );
        let selection = apply_filters(&dataset, MonthFilter::All, DayFilter::All);
        let mut buf = Vec::new();
        print_reports(&mut buf, &selection).expect("reports");
        let out = String::from_utf8(buf).expect("utf8");

        assert!(out.contains("Most common month: January"));
        assert!(out.contains("Most common day of week: Monday"));
        assert!(out.contains("Most common start and end station combination: A - B"));
        assert!(out.contains("Total travel time: 40.00 minutes"));
        assert!(out.contains("Mean travel time: 20.00 minutes"));
        assert_eq!(out.matches("This took ").count(), 4);
    }

    #[test]
    fn test_print_reports_empty_selection_reports_each_section() {
        let dataset = Dataset::new(City::Chicago, DemographicColumns::Complete, Vec::new());
        let selection = apply_filters(&dataset, MonthFilter::Month(2), DayFilter::All);
        let mut buf = Vec::new();
        print_reports(&mut buf, &selection).expect("reports");
        let out = String::from_utf8(buf).expect("utf8");

        assert_eq!(out.matches("No trips match the selected filters").count(), 4);
        assert!(!out.contains("Mean travel time"));
    }
}
