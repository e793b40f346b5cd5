use std::collections::BTreeMap;

use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::{SalaryDataset, SalaryRecord};
use crate::data::stats::quantile_sorted;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Percentile buckets, in column order.
pub const PERCENTILE_BUCKETS: [u32; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Salaries are reported in millions.
pub const SALARY_SCALE: f64 = 1_000_000.0;

/// Size of the outlier list.
pub const DEFAULT_OUTLIER_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Percentile table
// ---------------------------------------------------------------------------

/// One year of the percentile table. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileRow {
    pub year: i32,
    pub values: [Option<f64>; PERCENTILE_BUCKETS.len()],
}

/// Salary percentiles (in millions) per year, ascending by year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PercentileTable {
    pub rows: Vec<PercentileRow>,
}

impl PercentileTable {
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.iter().map(|r| r.year)
    }

    /// Value for `year` and bucket `percent` (0, 10, ..., 100).
    pub fn get(&self, year: i32, percent: u32) -> Option<f64> {
        let col = PERCENTILE_BUCKETS.iter().position(|&p| p == percent)?;
        self.rows.iter().find(|r| r.year == year)?.values[col]
    }

    /// The `(year, value)` series for one bucket column.
    pub fn column(&self, col: usize) -> impl Iterator<Item = (i32, Option<f64>)> + '_ {
        self.rows.iter().map(move |r| (r.year, r.values[col]))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Percentiles of salary for each year in `[first_year, last_year)`.
///
/// The upper bound is exclusive, unlike the inclusive year filter. Years
/// without any salary produce a row of missing cells.
pub fn compute_percentiles(
    subset: &[&SalaryRecord],
    first_year: i32,
    last_year: i32,
) -> PercentileTable {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for rec in subset {
        if let Some(salary) = rec.salary.filter(|s| !s.is_nan()) {
            by_year.entry(rec.year).or_default().push(salary);
        }
    }
    for salaries in by_year.values_mut() {
        salaries.sort_by(f64::total_cmp);
    }

    let rows = (first_year..last_year)
        .map(|year| {
            let mut values = [None; PERCENTILE_BUCKETS.len()];
            if let Some(sorted) = by_year.get(&year) {
                for (cell, &percent) in values.iter_mut().zip(PERCENTILE_BUCKETS.iter()) {
                    let q = quantile_sorted(sorted, f64::from(percent) / 100.0);
                    *cell = Some(q / SALARY_SCALE);
                }
            }
            PercentileRow { year, values }
        })
        .collect();

    PercentileTable { rows }
}

// ---------------------------------------------------------------------------
// Outliers
// ---------------------------------------------------------------------------

/// The `k` highest-paid records, descending. Equal salaries keep their
/// subset order; records without a salary are skipped. Position in the
/// returned vector is the display rank.
pub fn top_outliers(subset: &[&SalaryRecord], k: usize) -> Vec<SalaryRecord> {
    let mut ranked: Vec<(f64, &SalaryRecord)> = subset
        .iter()
        .filter_map(|rec| rec.salary.filter(|s| !s.is_nan()).map(|s| (s, *rec)))
        .collect();
    // `sort_by` is stable, so ties stay in row order.
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked
        .into_iter()
        .take(k)
        .map(|(_, rec)| rec.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything the dashboard shows for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub selection: FilterSelection,
    /// Indices into the dataset of the filtered records, in dataset order.
    pub subset: Vec<usize>,
    pub percentiles: PercentileTable,
    pub outliers: Vec<SalaryRecord>,
}

impl Report {
    /// Number of records that passed the filter.
    pub fn subset_len(&self) -> usize {
        self.subset.len()
    }

    /// Resolve the subset against the dataset it was built from.
    pub fn subset_records<'a>(&self, dataset: &'a SalaryDataset) -> Vec<&'a SalaryRecord> {
        self.subset
            .iter()
            .filter_map(|&i| dataset.records.get(i))
            .collect()
    }

    /// Chart title for this report.
    pub fn title(&self) -> String {
        format!(
            "Salaries for {} only, {} players",
            self.selection.position,
            self.subset_len()
        )
    }
}

/// Run the whole pipeline for one selection with the default outlier count.
pub fn generate_report(dataset: &SalaryDataset, selection: &FilterSelection) -> Report {
    generate_report_with(dataset, selection, DEFAULT_OUTLIER_COUNT)
}

/// Filter, aggregate and rank. Pure in `(dataset, selection, outlier_count)`.
pub fn generate_report_with(
    dataset: &SalaryDataset,
    selection: &FilterSelection,
    outlier_count: usize,
) -> Report {
    let subset = filtered_indices(dataset, selection);
    let records: Vec<&SalaryRecord> = subset.iter().map(|&i| &dataset.records[i]).collect();

    let percentiles = compute_percentiles(&records, selection.first_year, selection.last_year);
    let outliers = top_outliers(&records, outlier_count);

    log::debug!(
        "Report for {:?}: {} of {} records, {} percentile rows",
        selection,
        subset.len(),
        dataset.len(),
        percentiles.len()
    );

    Report {
        selection: selection.clone(),
        subset,
        percentiles,
        outliers,
    }
}
