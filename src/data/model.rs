use std::collections::{BTreeSet, HashSet};
use std::fmt;

use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// Missing-value tokens
// ---------------------------------------------------------------------------

/// Raw cell texts read as "no value", the same set pandas treats as NaN by
/// default when reading a CSV.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_na_token(raw: &str) -> bool {
    NA_TOKENS.contains(&raw)
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the indicator table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the pandas dtypes a CSV column ends up with.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Missing,
}

impl CellValue {
    /// Interpret `raw` according to the kind inferred for its column.
    pub fn parse(raw: &str, kind: ColumnKind) -> Self {
        if is_na_token(raw) {
            return CellValue::Missing;
        }
        match kind {
            ColumnKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Missing),
            ColumnKind::Float => match raw.trim().parse::<f64>() {
                Ok(v) if !v.is_nan() => CellValue::Float(v),
                _ => CellValue::Missing,
            },
            ColumnKind::Text => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Missing cells render as an empty string, which is also how they are
/// written back out to CSV.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the fractional part of whole floats ("100.0").
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// Best-effort inference over the raw texts of one column.
    ///
    /// NA tokens are ignored. A column with no remaining values is `Float`,
    /// like an all-NaN column in pandas.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Float;
        let mut present = values.into_iter().filter(|v| !is_na_token(v)).peekable();
        if present.peek().is_some() {
            kind = ColumnKind::Integer;
        }
        for raw in present {
            let trimmed = raw.trim();
            if kind == ColumnKind::Integer && trimmed.parse::<i64>().is_ok() {
                continue;
            }
            if trimmed.parse::<f64>().is_ok() {
                kind = ColumnKind::Float;
                continue;
            }
            return ColumnKind::Text;
        }
        kind
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

// ---------------------------------------------------------------------------
// RawTable – untyped loader output
// ---------------------------------------------------------------------------

/// Header plus rows of raw cell texts, as produced by every file loader
/// before kinds are inferred.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// One row of the table; cells are aligned with [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

/// The full typed dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Row>,
    key_index: usize,
}

impl Dataset {
    /// Infer column kinds and type every cell of `table`.
    ///
    /// `key_column` must be one of the headers; it is always typed as text.
    pub fn from_table(table: RawTable, key_column: &str) -> Result<Self> {
        let RawTable { headers, records } = table;

        if headers.is_empty() {
            bail!("table has no columns");
        }
        let mut seen = HashSet::new();
        for (idx, h) in headers.iter().enumerate() {
            if h.trim().is_empty() {
                bail!("empty column name at position {idx}");
            }
            if !seen.insert(h.as_str()) {
                bail!("duplicate column '{h}'");
            }
        }
        let Some(key_index) = headers.iter().position(|h| h == key_column) else {
            bail!("missing key column '{key_column}'");
        };
        for (row_no, record) in records.iter().enumerate() {
            if record.len() != headers.len() {
                bail!(
                    "row {row_no} has {} fields but the header has {}",
                    record.len(),
                    headers.len()
                );
            }
        }

        let columns: Vec<Column> = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let kind = if idx == key_index {
                    ColumnKind::Text
                } else {
                    ColumnKind::infer(records.iter().map(|r| r[idx].as_str()))
                };
                Column { name, kind }
            })
            .collect();

        let rows = records
            .iter()
            .map(|record| Row {
                cells: record
                    .iter()
                    .zip(&columns)
                    .map(|(raw, col)| CellValue::parse(raw, col.kind))
                    .collect(),
            })
            .collect();

        Ok(Dataset {
            columns,
            rows,
            key_index,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn key_column(&self) -> &str {
        &self.columns[self.key_index].name
    }

    pub(crate) fn key_index(&self) -> usize {
        self.key_index
    }

    /// Position of `name` in the column list.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Key of a row, or `""` when the key cell is missing.
    pub fn country_of<'a>(&self, row: &'a Row) -> &'a str {
        row.cells[self.key_index].as_text().unwrap_or("")
    }

    /// First row whose key equals `country`.
    pub fn find_row(&self, country: &str) -> Option<&Row> {
        self.rows
            .iter()
            .find(|row| row.cells[self.key_index].as_text() == Some(country))
    }

    /// Distinct countries, sorted ascending.
    pub fn list_countries(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.cells[self.key_index].as_text())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Numeric column names in their original order.
    pub fn list_numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(idx, col)| *idx != self.key_index && col.kind.is_numeric())
            .map(|(_, col)| col.name.as_str())
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
