use super::model::SalaryDataset;

// ---------------------------------------------------------------------------
// Filter predicate: inclusive year range + exact position
// ---------------------------------------------------------------------------

/// The user's current selection. Both year bounds are inclusive for
/// filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    pub first_year: i32,
    pub last_year: i32,
    pub position: String,
}

impl FilterSelection {
    pub fn new(first_year: i32, last_year: i32, position: impl Into<String>) -> Self {
        Self {
            first_year,
            last_year,
            position: position.into(),
        }
    }
}

/// Return indices of records that pass the selection, in dataset order.
///
/// A record passes when `first_year <= year <= last_year` and its `pos` is
/// byte-for-byte equal to `selection.position`.
pub fn filtered_indices(dataset: &SalaryDataset, selection: &FilterSelection) -> Vec<usize> {
    let years = selection.first_year..=selection.last_year;
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| years.contains(&rec.year) && rec.pos == selection.position)
        .map(|(i, _)| i)
        .collect()
}
