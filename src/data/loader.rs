use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DashboardError;
use super::model::{Dataset, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, comma separated (the usual export)
/// * `.json`    – `[{ "country": "...", ...indicators }, ...]`
/// * `.parquet` – flat table of string / integer / float / bool columns
///
/// Any failure, including a missing `key_column`, is a
/// [`DashboardError::Load`]; no partial dataset is ever returned.
pub fn load_file(path: &Path, key_column: &str) -> Result<Dataset, DashboardError> {
    read_table(path)
        .and_then(|table| Dataset::from_table(table, key_column))
        .map_err(|e| DashboardError::Load(format!("{}: {e:#}", path.display())))
}

fn read_table(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one country per row.
/// Rows with a different field count than the header are rejected.
fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(RawTable { headers, records })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "country": "Albania", "Region": "SouthernEurope", "Population": 2930 },
///   ...
/// ]
/// ```
///
/// Column order follows the keys of the first record.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    if let Some(first) = records.first() {
        let obj = first.as_object().context("Row 0 is not a JSON object")?;
        headers.extend(obj.keys().cloned());
    }

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        if let Some(extra) = obj.keys().find(|k| !headers.contains(k)) {
            bail!("Row {i}: unexpected column '{extra}'");
        }

        let row = headers
            .iter()
            .map(|h| {
                obj.get(h)
                    .map_or(Ok(String::new()), json_to_text)
                    .with_context(|| format!("Row {i}, column '{h}'"))
            })
            .collect::<Result<Vec<String>>>()?;
        rows.push(row);
    }

    Ok(RawTable {
        headers,
        records: rows,
    })
}

fn json_to_text(val: &JsonValue) -> Result<String> {
    match val {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Null => Ok(String::new()),
        JsonValue::Array(_) | JsonValue::Object(_) => bail!("nested values are not supported"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the indicator table.
///
/// Every column must be a flat Utf8 / LargeUtf8 / Int32 / Int64 / Float32 /
/// Float64 / Boolean column; nulls become empty cells.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let n_rows = batch.num_rows();

        for row in 0..n_rows {
            let record = batch
                .columns()
                .iter()
                .zip(&headers)
                .map(|(col, name)| {
                    arrow_cell_to_text(col, row)
                        .with_context(|| format!("Row {row}, column '{name}'"))
                })
                .collect::<Result<Vec<String>>>()?;
            records.push(record);
        }
    }

    Ok(RawTable { headers, records })
}

// -- Parquet / Arrow helpers --

/// Render a single Arrow cell as the text a CSV export would hold.
fn arrow_cell_to_text(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row).to_string(),
        DataType::Boolean => col.as_boolean().value(row).to_string(),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(text)
}
