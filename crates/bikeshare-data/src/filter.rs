//! Month / weekday filtering over a loaded [`Dataset`].

use bikeshare_core::models::{DayFilter, Dataset, DemographicColumns, MonthFilter, TripRecord};
use tracing::debug;

// ── Selection ─────────────────────────────────────────────────────────────────

/// An order-preserving view of the trips in a [`Dataset`].
///
/// Holds row positions into the dataset rather than copies, so narrowing a
/// selection never touches the loaded records.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> Selection<'a> {
    /// Every trip in `dataset`.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: (0..dataset.len()).collect(),
        }
    }

    /// Keep only trips that started in the selected month.
    pub fn by_month(self, month: MonthFilter) -> Self {
        self.retain(|trip| month.matches(trip.month()))
    }

    /// Keep only trips that started on the selected weekday.
    pub fn by_day(self, day: DayFilter) -> Self {
        self.retain(|trip| day.matches(trip.weekday()))
    }

    fn retain(mut self, keep: impl Fn(&TripRecord) -> bool) -> Self {
        let records = self.dataset.records();
        self.rows.retain(|&row| keep(&records[row]));
        self
    }

    /// Row positions of the selected trips in the underlying dataset.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Selected trips in original file order.
    pub fn records(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        let records = self.dataset.records();
        self.rows.iter().map(move |&row| &records[row])
    }

    pub fn columns(&self) -> DemographicColumns {
        self.dataset.columns()
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Select the trips in `dataset` matching both `month` and `day`.
///
/// `All` on either axis imposes no constraint. The two predicates commute, so
/// the order they are applied in does not change the result.
pub fn apply_filters(dataset: &Dataset, month: MonthFilter, day: DayFilter) -> Selection<'_> {
    let selection = Selection::all(dataset).by_month(month).by_day(day);
    debug!(
        "Filter month={} day={} kept {} of {} trips",
        month,
        day,
        selection.len(),
        dataset.len()
    );
    selection
}

// ── Tests ─────────────────────────────────────────────────────────────────────
