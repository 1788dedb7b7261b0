use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeListArray,
    ListArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{Roster, Student};

// ---------------------------------------------------------------------------
// Load outcome
// ---------------------------------------------------------------------------

/// A source entry that failed validation and was left out of the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    /// Zero-based position of the entry in the source.
    pub row: usize,
    pub reason: String,
}

/// Result of reading a data source: the valid students plus what was skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub roster: Roster,
    pub rejected: Vec<RejectedEntry>,
}

impl LoadOutcome {
    fn from_rows(rows: Vec<std::result::Result<Student, String>>) -> Self {
        let mut students = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();

        for (row, parsed) in rows.into_iter().enumerate() {
            match parsed {
                Ok(student) => students.push(student),
                Err(reason) => {
                    log::warn!("Skipping entry {row}: {reason}");
                    rejected.push(RejectedEntry { row, reason });
                }
            }
        }

        LoadOutcome {
            roster: Roster::new(students),
            rejected,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a roster from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` / `.txt` – `[{ "name": "...", "address": "...", "notes": [...] }, ...]`
/// * `.csv`           – columns `name`, `address`, `notes` (semicolon-separated grades)
/// * `.parquet`       – `name` / `address` string columns, `notes` list column
///
/// Entries that fail validation are skipped and reported in
/// [`LoadOutcome::rejected`]; only a source that cannot be read at all is an
/// error.
pub fn load_file(path: &Path) -> Result<LoadOutcome> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" | "txt" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// [
///   { "name": "EMILY MARTIN", "address": "12 rue des Lilas", "notes": [12, 14, 16] },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LoadOutcome> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_json(&text)
}

/// Parse a JSON roster from text.
pub fn parse_json(text: &str) -> Result<LoadOutcome> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let rows = records
        .iter()
        .map(|rec| match rec.as_object() {
            Some(obj) => json_to_student(obj),
            None => Err("entry is not a JSON object".to_string()),
        })
        .collect();

    Ok(LoadOutcome::from_rows(rows))
}

fn json_to_student(obj: &Map<String, JsonValue>) -> std::result::Result<Student, String> {
    let name = match obj.get("name") {
        Some(JsonValue::String(s)) => s.clone(),
        Some(_) => return Err("'name' is not a string".to_string()),
        None => return Err("missing 'name'".to_string()),
    };

    let address = match obj.get("address") {
        Some(JsonValue::String(s)) => s.clone(),
        None | Some(JsonValue::Null) => String::new(),
        Some(_) => return Err(format!("{name}: 'address' is not a string")),
    };

    // A notes field that is not an array is treated as "no grades".
    let notes = match obj.get("notes") {
        Some(JsonValue::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(j, v)| {
                v.as_f64()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| format!("{name}: notes[{j}] is not a number"))
            })
            .collect::<std::result::Result<Vec<f64>, String>>()?,
        _ => Vec::new(),
    };

    Ok(Student {
        name,
        address,
        notes,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with `name`, `address` and `notes` columns.
/// `notes` holds semicolon-separated grades: `"12;14;16"`. An empty cell
/// means no grades. `address` is optional.
fn load_csv(path: &Path) -> Result<LoadOutcome> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    let name_idx = headers
        .iter()
        .position(|h| h == "name")
        .context("CSV missing 'name' column")?;
    let address_idx = headers.iter().position(|h| h == "address");
    let notes_idx = headers
        .iter()
        .position(|h| h == "notes")
        .context("CSV missing 'notes' column")?;

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                rows.push(Err(format!("malformed CSV row: {e}")));
                continue;
            }
        };

        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        if name.is_empty() {
            rows.push(Err("empty 'name'".to_string()));
            continue;
        }
        let address = address_idx
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string();

        let parsed = parse_semicolon_grades(record.get(notes_idx).unwrap_or(""))
            .map(|notes| Student {
                name: name.clone(),
                address,
                notes,
            })
            .map_err(|reason| format!("{name}: {reason}"));
        rows.push(parsed);
    }

    Ok(LoadOutcome::from_rows(rows))
}

fn parse_semicolon_grades(s: &str) -> std::result::Result<Vec<f64>, String> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(';')
        .enumerate()
        .map(|(j, tok)| {
            tok.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| format!("notes[{j}]: '{tok}' is not a number"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing a roster.
///
/// Expected schema:
/// - `name`: Utf8 / LargeUtf8
/// - `address`: Utf8 / LargeUtf8 (optional column)
/// - `notes`: List or LargeList of Float64 / Float32 / Int64 / Int32
fn load_parquet(path: &Path) -> Result<LoadOutcome> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let name_idx = schema
            .index_of("name")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'name' column"))?;
        let notes_idx = schema
            .index_of("notes")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'notes' column"))?;
        let address_idx = schema.index_of("address").ok();

        let name_col = batch.column(name_idx);
        let notes_col = batch.column(notes_idx);
        let address_col = address_idx.map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let Some(name) = extract_string(name_col, row)? else {
                rows.push(Err("null 'name'".to_string()));
                continue;
            };
            let address = match address_col {
                Some(col) => extract_string(col, row)?.unwrap_or_default(),
                None => String::new(),
            };
            let entry = rows.len();
            let parsed = extract_grades(notes_col, row)
                .with_context(|| format!("Row {entry}: failed to read 'notes'"))?
                .map(|notes| Student {
                    name: name.clone(),
                    address,
                    notes,
                })
                .map_err(|reason| format!("{name}: {reason}"));
            rows.push(parsed);
        }
    }

    Ok(LoadOutcome::from_rows(rows))
}

// -- Parquet / Arrow helpers --

/// Read a string cell, `None` when null.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        other => bail!("Expected Utf8 column, got {other:?}"),
    };
    Ok(Some(value))
}

/// Extract the grades of one row from a List or LargeList column.
///
/// The outer error means the column itself is unusable; the inner one
/// rejects just this row (null or non-finite grade). A null list reads as
/// no grades.
fn extract_grades(
    col: &Arc<dyn Array>,
    row: usize,
) -> Result<std::result::Result<Vec<f64>, String>> {
    if col.is_null(row) {
        return Ok(Ok(Vec::new()));
    }

    let values_array = match col.data_type() {
        DataType::List(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<ListArray>()
                .context("expected ListArray")?;
            list_arr.value(row)
        }
        DataType::LargeList(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<LargeListArray>()
                .context("expected LargeListArray")?;
            list_arr.value(row)
        }
        other => bail!("Expected List or LargeList column, got {other:?}"),
    };

    let any = values_array.as_any();
    let values: Vec<Option<f64>> = if let Some(arr) = any.downcast_ref::<Float64Array>() {
        arr.iter().collect()
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        arr.iter().map(|v| v.map(f64::from)).collect()
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        arr.iter().map(|v| v.map(|i| i as f64)).collect()
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        arr.iter().map(|v| v.map(f64::from)).collect()
    } else {
        bail!(
            "List inner type is {:?}, expected a numeric type",
            values_array.data_type()
        )
    };

    Ok(values
        .into_iter()
        .enumerate()
        .map(|(j, v)| match v {
            Some(n) if n.is_finite() => Ok(n),
            Some(n) => Err(format!("notes[{j}] is not a finite number ({n})")),
            None => Err(format!("notes[{j}] is null")),
        })
        .collect())
}
