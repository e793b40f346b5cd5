//! End-to-end checks of the report pipeline: load → filter → percentiles →
//! outliers, against inline datasets and the on-disk fixture.

use std::path::Path;

use pretty_assertions::assert_eq;
use salary_dashboard::data::cache::DatasetCache;
use salary_dashboard::data::filter::FilterSelection;
use salary_dashboard::data::loader::load_file;
use salary_dashboard::data::model::{SalaryDataset, SalaryRecord};
use salary_dashboard::report::{generate_report, PERCENTILE_BUCKETS};

fn fixture_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("salaries.csv")
        .leak()
}

fn three_row_dataset() -> SalaryDataset {
    SalaryDataset::from_records(
        vec![
            SalaryRecord::new(1991, "OF", 100_000.0),
            SalaryRecord::new(1991, "OF", 900_000.0),
            SalaryRecord::new(1992, "OF", 500_000.0),
        ],
        Vec::new(),
    )
}

#[test]
fn upper_year_is_exclusive_for_percentiles() {
    let ds = three_row_dataset();
    let report = generate_report(&ds, &FilterSelection::new(1991, 1993, "OF"));

    assert_eq!(report.subset_len(), 3);
    assert_eq!(report.percentiles.years().collect::<Vec<_>>(), vec![1991, 1992]);
    assert_eq!(report.percentiles.get(1991, 0), Some(0.1));
    assert_eq!(report.percentiles.get(1991, 100), Some(0.9));
    assert_eq!(report.percentiles.get(1992, 50), Some(0.5));
}

#[test]
fn absent_position_gives_empty_everything() {
    let ds = three_row_dataset();
    let report = generate_report(&ds, &FilterSelection::new(1991, 1993, "DH"));

    assert_eq!(report.subset_len(), 0);
    assert_eq!(report.percentiles.len(), 2);
    assert!(report
        .percentiles
        .rows
        .iter()
        .all(|r| r.values.iter().all(Option::is_none)));
    assert!(report.outliers.is_empty());
}

#[test]
fn single_year_range_has_no_percentile_rows() {
    let ds = three_row_dataset();
    let report = generate_report(&ds, &FilterSelection::new(2000, 2000, "OF"));
    assert!(report.percentiles.is_empty());
}

#[test]
fn report_is_idempotent() {
    let ds = three_row_dataset();
    let selection = FilterSelection::new(1991, 1993, "OF");
    assert_eq!(generate_report(&ds, &selection), generate_report(&ds, &selection));
}

#[test]
fn fixture_report_for_outfielders() {
    let ds = load_file(fixture_path()).expect("fixture file should load");
    assert_eq!(ds.len(), 12);
    assert_eq!(ds.column_names, vec!["year", "player", "salary", "pos", "team"]);

    let report = generate_report(&ds, &FilterSelection::new(1991, 1993, "OF"));
    assert_eq!(report.subset_len(), 8);
    assert_eq!(report.title(), "Salaries for OF only, 8 players");

    assert_eq!(report.percentiles.years().collect::<Vec<_>>(), vec![1991, 1992]);
    assert!(report.percentiles.rows.iter().all(|r| r.values.len() == PERCENTILE_BUCKETS.len()));
    assert_eq!(report.percentiles.get(1991, 0), Some(0.5));
    assert_eq!(report.percentiles.get(1991, 50), Some(2.2));
    assert_eq!(report.percentiles.get(1991, 100), Some(2.3));
    assert_eq!(report.percentiles.get(1992, 50), Some(3.2));
}

#[test]
fn fixture_outliers_skip_blank_salaries() {
    let ds = load_file(fixture_path()).unwrap();
    let report = generate_report(&ds, &FilterSelection::new(1991, 2017, "OF"));

    let players: Vec<String> = report.outliers.iter().map(|r| r.cell_text("player")).collect();
    assert_eq!(
        players,
        vec![
            "bondsba01", "bondsba01", "puckeki01", "griffke02", "bondsba01", "gwynnto01",
            "vanslan01",
        ]
    );
    let salaries: Vec<f64> = report.outliers.iter().filter_map(|r| r.salary).collect();
    assert!(salaries.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn fixture_year_with_single_salary_is_flat() {
    let ds = load_file(fixture_path()).unwrap();
    let report = generate_report(&ds, &FilterSelection::new(1993, 1994, "OF"));

    assert_eq!(report.subset_len(), 2);
    let row = &report.percentiles.rows[0];
    assert_eq!(row.year, 1993);
    assert!(row.values.iter().all(|v| *v == Some(4.516666)));
}

#[test]
fn cache_serves_fixture_once() {
    let cache = DatasetCache::new();
    let first = cache.get_or_load(fixture_path()).unwrap() as *const SalaryDataset;
    let second = cache.get_or_load(fixture_path()).unwrap() as *const SalaryDataset;
    assert_eq!(first, second);
}
