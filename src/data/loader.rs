use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, SalaryDataset, SalaryRecord};

/// Columns every source must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["year", "pos", "salary"];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors raised while reading a salary dataset. All of them are fatal for a
/// report run.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// `row` is 1-based (header = row 0).
    #[error("row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("expected {0}")]
    Malformed(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; `year`, `pos`, `salary` matched by name
/// * `.json`    – `[{ "year": 1991, "pos": "OF", "salary": 100000, ... }, ...]`
/// * `.parquet` – columnar file with the same three columns
///
/// Any other column is carried along as an extra cell.
pub fn load_file(path: &Path) -> Result<SalaryDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Row conversion shared by all formats
// ---------------------------------------------------------------------------

fn year_from(cell: &CellValue, row: usize) -> Result<i32, DataLoadError> {
    let invalid = || DataLoadError::InvalidValue {
        row,
        column: "year",
        value: cell.to_string(),
    };
    match cell {
        CellValue::Integer(i) => i32::try_from(*i).map_err(|_| invalid()),
        // Whole-number floats, as a dataframe writer emits for a year column
        // that once held nulls ("1991.0").
        CellValue::Float(f)
            if f.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(f) =>
        {
            Ok(*f as i32)
        }
        CellValue::String(s) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn salary_from(cell: &CellValue, row: usize) -> Result<Option<f64>, DataLoadError> {
    match cell {
        CellValue::Null => Ok(None),
        CellValue::String(s) if s.trim().is_empty() => Ok(None),
        CellValue::String(s) => s.trim().parse().map(Some).map_err(|_| {
            DataLoadError::InvalidValue {
                row,
                column: "salary",
                value: s.clone(),
            }
        }),
        other => other.as_f64().map(Some).ok_or_else(|| DataLoadError::InvalidValue {
            row,
            column: "salary",
            value: other.to_string(),
        }),
    }
}

fn pos_from(cell: CellValue) -> String {
    match cell {
        CellValue::String(s) => s,
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Split a row of named cells into a [`SalaryRecord`].
fn build_record(
    row: usize,
    cells: impl IntoIterator<Item = (String, CellValue)>,
) -> Result<SalaryRecord, DataLoadError> {
    let mut year = None;
    let mut pos = None;
    let mut salary = None;
    let mut extra = std::collections::BTreeMap::new();

    for (name, cell) in cells {
        match name.as_str() {
            "year" => year = Some(year_from(&cell, row)?),
            "pos" => pos = Some(pos_from(cell)),
            "salary" => salary = Some(salary_from(&cell, row)?),
            _ => {
                extra.insert(name, cell);
            }
        }
    }

    Ok(SalaryRecord {
        year: year.ok_or_else(|| DataLoadError::MissingColumn("year".into()))?,
        pos: pos.ok_or_else(|| DataLoadError::MissingColumn("pos".into()))?,
        salary: salary.ok_or_else(|| DataLoadError::MissingColumn("salary".into()))?,
        extra,
    })
}

fn check_columns(columns: &[String]) -> Result<(), DataLoadError> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(DataLoadError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one player-season per row.
/// `pos` is kept verbatim; every other non-required column has its type
/// guessed.
fn load_csv(path: &Path) -> Result<SalaryDataset, DataLoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    check_columns(&headers)?;

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let cells = headers.iter().zip(record.iter()).map(|(name, raw)| {
            let cell = if name == "pos" {
                CellValue::String(raw.to_string())
            } else {
                CellValue::guess(raw)
            };
            (name.clone(), cell)
        });
        records.push(build_record(i + 1, cells)?);
    }

    Ok(SalaryDataset::from_records(records, headers))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as `df.to_json(orient='records')`
/// writes it):
///
/// ```json
/// [
///   { "year": 1991, "pos": "OF", "salary": 3200000, "player": "..." },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<SalaryDataset, DataLoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    let rows = root
        .as_array()
        .ok_or_else(|| DataLoadError::Malformed("a top-level JSON array".into()))?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| {
            DataLoadError::Malformed(format!("row {} to be a JSON object", i + 1))
        })?;

        for key in obj.keys() {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
        }

        let cells = obj.iter().map(|(k, v)| (k.clone(), json_to_cell(v)));
        records.push(build_record(i + 1, cells)?);
    }

    Ok(SalaryDataset::from_records(records, column_names))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of salary records.
///
/// Expected schema:
/// - `year`: Int32 or Int64
/// - `pos`: Utf8 or LargeUtf8
/// - `salary`: any integer or float column (nullable)
/// - Any other columns are kept as extra cells
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<SalaryDataset, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_columns(&column_names)?;

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let cells = schema
                .fields()
                .iter()
                .zip(batch.columns())
                .map(|(field, col)| (field.name().clone(), extract_cell(col, row)));
            records.push(build_record(records.len() + 1, cells)?);
        }
    }

    Ok(SalaryDataset::from_records(records, column_names))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    cell.unwrap_or_else(|| CellValue::String(format!("{:?}", col.data_type())))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn csv_keeps_extra_columns_in_header_order() {
        let file = write_temp(
            ".csv",
            "year,player,salary,pos,team\n1991,Bonds,2300000,OF,PIT\n1992,Clark,,1B,SFN\n",
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.column_names, vec!["year", "player", "salary", "pos", "team"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].salary, Some(2_300_000.0));
        assert_eq!(
            ds.records[0].extra.get("team"),
            Some(&CellValue::String("PIT".into()))
        );
        assert_eq!(ds.records[1].salary, None);
        assert_eq!(ds.records[1].pos, "1B");
    }

    #[test]
    fn csv_pos_is_not_normalised() {
        let file = write_temp(".csv", "year,pos,salary\n1991, of ,100\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].pos, " of ");
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let file = write_temp(".csv", "year,salary\n1991,100\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "pos"));
    }

    #[test]
    fn csv_bad_year_reports_row() {
        let file = write_temp(".csv", "year,pos,salary\n1991,OF,1\nnineteen,OF,2\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidValue { row: 2, column: "year", .. }
        ));
    }

    #[test]
    fn csv_bad_salary_is_an_error() {
        let file = write_temp(".csv", "year,pos,salary\n1991,OF,lots\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidValue { column: "salary", .. }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/salaries.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("salaries.xlsx")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedExtension(ref e) if e == "xlsx"));
    }

    #[test]
    fn json_records_load() {
        let file = write_temp(
            ".json",
            r#"[{"year": 1991, "pos": "P", "salary": 5000000.5, "player": "Clemens"},
                {"year": 1992, "pos": "P", "salary": null}]"#,
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].salary, Some(5_000_000.5));
        assert_eq!(ds.records[1].salary, None);
        assert!(ds.column_names.contains(&"player".to_string()));
    }

    #[test]
    fn json_non_array_is_malformed() {
        let file = write_temp(".json", r#"{"year": 1991}"#);
        assert!(matches!(
            load_file(file.path()),
            Err(DataLoadError::Malformed(_))
        ));
    }

    #[test]
    fn json_keeps_key_order() {
        let file = write_temp(
            ".json",
            r#"[{"year": 1991, "pos": "OF", "salary": 1, "player": "x"}]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.column_names, vec!["year", "pos", "salary", "player"]);
    }

    #[test]
    fn csv_whole_number_float_year_is_accepted() {
        let file = write_temp(".csv", "year,pos,salary\n1991.0,OF,100\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].year, 1991);
    }

    #[test]
    fn csv_fractional_year_reports_raw_value() {
        let file = write_temp(".csv", "year,pos,salary\n1991.5,OF,100\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "row 1: invalid year value '1991.5'");
    }

    // -- Parquet --

    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_parquet(fields: Vec<Field>, columns: Vec<ArrayRef>) -> tempfile::NamedTempFile {
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).expect("build batch");

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("create temp file");
        let out = File::create(file.path()).expect("open temp file");
        let mut writer = ArrowWriter::try_new(out, schema, None).expect("create writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");
        file
    }

    #[test]
    fn parquet_records_load_with_null_salary() {
        let file = write_parquet(
            vec![
                Field::new("year", DataType::Int64, false),
                Field::new("player", DataType::Utf8, false),
                Field::new("salary", DataType::Float64, true),
                Field::new("pos", DataType::Utf8, false),
            ],
            vec![
                Arc::new(Int64Array::from(vec![1991, 1992])) as ArrayRef,
                Arc::new(StringArray::from(vec!["bondsba01", "griffke02"])) as ArrayRef,
                Arc::new(Float64Array::from(vec![Some(2_300_000.0), None])) as ArrayRef,
                Arc::new(StringArray::from(vec!["OF", "1B"])) as ArrayRef,
            ],
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.column_names, vec!["year", "player", "salary", "pos"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, 1991);
        assert_eq!(ds.records[0].pos, "OF");
        assert_eq!(ds.records[0].salary, Some(2_300_000.0));
        assert_eq!(
            ds.records[0].extra.get("player"),
            Some(&CellValue::String("bondsba01".into()))
        );
        assert_eq!(ds.records[1].year, 1992);
        assert_eq!(ds.records[1].salary, None);
    }

    #[test]
    fn parquet_integer_salary_is_numeric() {
        let file = write_parquet(
            vec![
                Field::new("year", DataType::Int64, false),
                Field::new("pos", DataType::Utf8, false),
                Field::new("salary", DataType::Int64, true),
            ],
            vec![
                Arc::new(Int64Array::from(vec![2001])) as ArrayRef,
                Arc::new(StringArray::from(vec!["SS"])) as ArrayRef,
                Arc::new(Int64Array::from(vec![25_200_000])) as ArrayRef,
            ],
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].salary, Some(25_200_000.0));
    }

    #[test]
    fn parquet_missing_pos_column_is_an_error() {
        let file = write_parquet(
            vec![
                Field::new("year", DataType::Int64, false),
                Field::new("salary", DataType::Int64, true),
            ],
            vec![
                Arc::new(Int64Array::from(vec![1991])) as ArrayRef,
                Arc::new(Int64Array::from(vec![100_000])) as ArrayRef,
            ],
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "pos"));
    }
}
