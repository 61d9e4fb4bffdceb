//! Page-by-page display of the raw trips behind a report.

use std::io::{self, BufRead, Write};

use bikeshare_core::models::{DemographicColumns, TripRecord};
use bikeshare_data::filter::Selection;
use unicode_width::UnicodeWidthStr;

use crate::prompt::Console;

const MORE_QUESTION: &str = "Would you like to see more data? (yes, no): ";
const TIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Walks a [`Selection`] a fixed number of rows at a time.
pub struct RawDataPager<'s, 'a> {
    selection: &'s Selection<'a>,
    page_size: usize,
    shown: usize,
}

impl<'s, 'a> RawDataPager<'s, 'a> {
    /// `page_size` is clamped to at least one row.
    pub fn new(selection: &'s Selection<'a>, page_size: usize) -> Self {
        Self {
            selection,
            page_size: page_size.max(1),
            shown: 0,
        }
    }

    /// `true` once every selected row has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.shown >= self.selection.len()
    }

    /// Render the next page as an aligned text table, or `None` when no rows
    /// are left.
    pub fn next_page(&mut self) -> Option<String> {
        if self.is_exhausted() {
            return None;
        }
        let end = (self.shown + self.page_size).min(self.selection.len());
        let rows = &self.selection.rows()[self.shown..end];
        let records = self.selection.dataset().records();

        let page: Vec<(usize, &TripRecord)> = rows.iter().map(|&r| (r, &records[r])).collect();
        self.shown = end;
        Some(render_table(&page, self.selection.columns()))
    }
}

/// Ask whether to see more raw data and print a page for every "yes".
///
/// Stops on "no" or when the selection runs out.
pub fn page_through<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    selection: &Selection<'_>,
    page_size: usize,
) -> io::Result<()> {
    let mut pager = RawDataPager::new(selection, page_size);
    loop {
        if !console.ask_yes_no(MORE_QUESTION)? {
            return Ok(());
        }
        match pager.next_page() {
            Some(table) => write!(console.output(), "{}", table)?,
            None => {
                writeln!(console.output(), "No more rows to display.")?;
                return Ok(());
            }
        }
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn render_table(page: &[(usize, &TripRecord)], columns: DemographicColumns) -> String {
    let mut header = vec![
        String::new(),
        "Start Time".to_string(),
        "End Time".to_string(),
        "Start Station".to_string(),
        "End Station".to_string(),
        "User Type".to_string(),
    ];
    if columns == DemographicColumns::Complete {
        header.push("Gender".to_string());
        header.push("Birth Year".to_string());
    }

    let mut rows: Vec<Vec<String>> = vec![header];
    for (row, trip) in page {
        let mut cells = vec![
            row.to_string(),
            trip.start_time.format(TIME_FMT).to_string(),
            trip.end_time.format(TIME_FMT).to_string(),
            trip.start_station.clone(),
            trip.end_station.clone(),
            trip.user_type.clone(),
        ];
        if columns == DemographicColumns::Complete {
            cells.push(trip.gender.clone().unwrap_or_default());
            cells.push(trip.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        rows.push(cells);
    }

    let mut widths = vec![0usize; rows[0].len()];
    for cells in &rows {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    for cells in &rows {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{}{}", cell, " ".repeat(w - cell.width())))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
