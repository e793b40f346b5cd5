use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in an auxiliary column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell for columns the report does not interpret
/// (player name, team, ...). Kept only so the head tables can show whole rows.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw text cell the way a dataframe reader would.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Position codes offered by the position selector, in display order.
pub const POSITIONS: [&str; 8] = ["OF", "1B", "P", "DH", "3B", "2B", "C", "SS"];

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One player-season. `pos` is stored verbatim; comparisons against it are
/// exact.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    pub year: i32,
    pub pos: String,
    /// Salary in the currency units of the source file. `None` for a blank
    /// cell.
    pub salary: Option<f64>,
    /// Every other column of the row: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl SalaryRecord {
    pub fn new(year: i32, pos: impl Into<String>, salary: f64) -> Self {
        Self {
            year,
            pos: pos.into(),
            salary: Some(salary),
            extra: BTreeMap::new(),
        }
    }

    /// Render the named column as display text.
    pub fn cell_text(&self, column: &str) -> String {
        match column {
            "year" => self.year.to_string(),
            "pos" => self.pos.clone(),
            "salary" => self
                .salary
                .map(|s| format!("{s:.0}"))
                .unwrap_or_else(|| CellValue::Null.to_string()),
            other => self
                .extra
                .get(other)
                .unwrap_or(&CellValue::Null)
                .to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    /// All records in source order.
    pub records: Vec<SalaryRecord>,
    /// Column names in source order (includes `year`, `pos`, `salary`).
    pub column_names: Vec<String>,
    /// Distinct position codes present in the data.
    pub positions: BTreeSet<String>,
}

impl SalaryDataset {
    /// Build the dataset from loaded records. `column_names` is taken as-is;
    /// when empty, the three required columns plus every extra column seen
    /// are used.
    pub fn from_records(records: Vec<SalaryRecord>, column_names: Vec<String>) -> Self {
        let positions = records.iter().map(|r| r.pos.clone()).collect();

        let column_names = if column_names.is_empty() {
            let mut names: Vec<String> = ["year", "pos", "salary"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let extras: BTreeSet<&String> = records.iter().flat_map(|r| r.extra.keys()).collect();
            names.extend(extras.into_iter().cloned());
            names
        } else {
            column_names
        };

        SalaryDataset {
            records,
            column_names,
            positions,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record has exactly this position code.
    pub fn has_position(&self, pos: &str) -> bool {
        self.positions.contains(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_prefers_integer_then_float() {
        assert_eq!(CellValue::guess("42"), CellValue::Integer(42));
        assert_eq!(CellValue::guess("4.5"), CellValue::Float(4.5));
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(
            CellValue::guess("Bonds, Barry"),
            CellValue::String("Bonds, Barry".into())
        );
    }

    #[test]
    fn default_columns_include_extras() {
        let mut rec = SalaryRecord::new(1991, "OF", 100_000.0);
        rec.extra
            .insert("team".into(), CellValue::String("SFN".into()));
        let ds = SalaryDataset::from_records(vec![rec], Vec::new());

        assert_eq!(ds.column_names, vec!["year", "pos", "salary", "team"]);
        assert!(ds.has_position("OF"));
        assert!(!ds.has_position("of"));
    }

    #[test]
    fn cell_text_reads_core_and_extra_columns() {
        let mut rec = SalaryRecord::new(2001, "SS", 25_200_000.0);
        rec.extra
            .insert("player".into(), CellValue::String("Rodriguez".into()));

        assert_eq!(rec.cell_text("year"), "2001");
        assert_eq!(rec.cell_text("salary"), "25200000");
        assert_eq!(rec.cell_text("player"), "Rodriguez");
        assert_eq!(rec.cell_text("team"), "<null>");
    }
}
