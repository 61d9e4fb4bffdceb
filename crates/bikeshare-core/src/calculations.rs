use std::collections::HashMap;
use std::hash::Hash;

// ── Frequency counting ────────────────────────────────────────────────────────

/// Count how often each value occurs.
///
/// The result is ordered by descending count. Values with equal counts keep
/// the order in which they were first encountered, so the first entry is the
/// mode under the "first-encountered wins" tie-break.
///
/// # Examples
///
/// ```
/// use bikeshare_core::calculations::frequency_table;
///
/// let table = frequency_table(["b", "a", "a", "b", "c"]);
/// assert_eq!(table, vec![("b", 2), ("a", 2), ("c", 1)]);
/// ```
pub fn frequency_table<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut first_seen: Vec<T> = Vec::new();
    let mut counts: HashMap<T, usize> = HashMap::new();

    for value in values {
        match counts.get_mut(&value) {
            Some(count) => *count += 1,
            None => {
                first_seen.push(value.clone());
                counts.insert(value, 1);
            }
        }
    }

    let mut table: Vec<(T, usize)> = first_seen
        .into_iter()
        .map(|value| {
            let count = counts.remove(&value).unwrap_or(0);
            (value, count)
        })
        .collect();

    // sort_by is stable, which is what keeps ties in first-seen order.
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// The most frequent value, ties going to the one seen first.
///
/// Returns `None` for an empty input.
///
/// # Examples
///
/// ```
/// use bikeshare_core::calculations::mode;
///
/// assert_eq!(mode([3, 1, 1, 3]), Some(3));
/// assert_eq!(mode(Vec::<u32>::new()), None);
/// ```
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    frequency_table(values)
        .into_iter()
        .next()
        .map(|(value, _)| value)
}
