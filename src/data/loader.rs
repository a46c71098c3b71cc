use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use calamine::{open_workbook_auto, Data, Range, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::DataLoadError;
use super::model::{RegionRecord, RegionTable, ScoreColumn, ID_COLUMN, SCORE_MAX, SCORE_MIN};

/// Workbook shipped alongside the dashboard.
pub const DEFAULT_SOURCE: &str = "Region Charts Master.xlsx";
/// Sheet holding the SA3 house scores.
pub const DEFAULT_SHEET: &str = "Radar Sa3 Houses";

/// What to do with a whole-number score outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Fail the load with [`DataLoadError::ScoreOutOfRange`].
    #[default]
    Reject,
    /// Pull the value to the nearest bound and log a warning.
    Clamp,
}

// ---------------------------------------------------------------------------
// Memoized entry-point
// ---------------------------------------------------------------------------

static TABLE: OnceLock<RegionTable> = OnceLock::new();

/// Load the region table once per process.
///
/// The first successful call parses `path`; every later call returns the
/// same table and ignores its arguments. A failed load is not cached.
pub fn load(
    path: &Path,
    sheet: &str,
    policy: OutOfRangePolicy,
) -> Result<&'static RegionTable, DataLoadError> {
    if let Some(table) = TABLE.get() {
        return Ok(table);
    }
    let table = load_file(path, sheet, policy)?;
    log::info!(
        "Loaded {} regions from {} [{sheet}]",
        table.len(),
        path.display()
    );
    Ok(TABLE.get_or_init(|| table))
}

/// Parse a region table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – the sheet named `sheet`
/// * `.csv`     – header row with `SA3` and the score columns
/// * `.json`    – `[{ "SA3": "...", "DOM": 3, ... }, ...]`
/// * `.parquet` – one column per header
pub fn load_file(
    path: &Path,
    sheet: &str,
    policy: OutOfRangePolicy,
) -> Result<RegionTable, DataLoadError> {
    std::fs::metadata(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, sheet)?,
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedExtension(other.to_string())),
    };
    raw.into_table(policy)
}

// ---------------------------------------------------------------------------
// Format-neutral intermediate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    fn text(s: impl AsRef<str>) -> Cell {
        let s = s.as_ref().trim();
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Header row plus body rows, before validation.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// First header matching `pred`, compared after trimming.
    fn position(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.headers.iter().position(|h| pred(h.trim()))
    }

    fn into_table(self, policy: OutOfRangePolicy) -> Result<RegionTable, DataLoadError> {
        let id_idx = self
            .position(|h| h == ID_COLUMN)
            .ok_or_else(|| DataLoadError::MissingColumn(ID_COLUMN.to_string()))?;
        let mut score_idx = [0usize; ScoreColumn::COUNT];
        for col in ScoreColumn::ALL {
            score_idx[col.index()] = self
                .position(|h| ScoreColumn::from_header(h) == Some(col))
                .ok_or_else(|| DataLoadError::MissingColumn(col.header().to_string()))?;
        }

        let mut records = Vec::with_capacity(self.rows.len());
        let mut incomplete = 0usize;

        'rows: for (n, row) in self.rows.iter().enumerate() {
            // Spreadsheet numbering: header is row 1.
            let row_no = n + 2;
            let cell = |i: usize| row.get(i).unwrap_or(&EMPTY_CELL);

            let Some(id) = region_id(cell(id_idx)) else {
                continue;
            };

            let mut values = [SCORE_MIN; ScoreColumn::COUNT];
            for col in ScoreColumn::ALL {
                match score_value(cell(score_idx[col.index()]), row_no, col, policy)? {
                    Some(v) => values[col.index()] = v,
                    None => {
                        log::warn!("Row {row_no} ({id}): '{col}' is empty, region skipped");
                        incomplete += 1;
                        continue 'rows;
                    }
                }
            }
            records.push(RegionRecord::new(id, values));
        }

        if incomplete > 0 {
            log::info!("{incomplete} incomplete rows skipped");
        }
        RegionTable::from_records(records).map_err(DataLoadError::DuplicateRegion)
    }
}

fn region_id(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) => Some(s.clone()),
        Cell::Number(v) if v.fract() == 0.0 => Some(format!("{}", *v as i64)),
        Cell::Number(v) => Some(v.to_string()),
    }
}

/// `Ok(None)` for an empty cell.
fn score_value(
    cell: &Cell,
    row: usize,
    column: ScoreColumn,
    policy: OutOfRangePolicy,
) -> Result<Option<u8>, DataLoadError> {
    let invalid = |value: String| DataLoadError::InvalidScore {
        row,
        column: column.header().to_string(),
        value,
    };

    let v = match cell {
        Cell::Empty => return Ok(None),
        Cell::Number(v) => *v,
        Cell::Text(s) => s.parse::<f64>().map_err(|_| invalid(s.clone()))?,
    };
    if !v.is_finite() || v.fract() != 0.0 {
        return Err(invalid(v.to_string()));
    }

    let whole = v as i64;
    let lo = i64::from(SCORE_MIN);
    let hi = i64::from(SCORE_MAX);
    if (lo..=hi).contains(&whole) {
        return Ok(Some(whole as u8));
    }
    match policy {
        OutOfRangePolicy::Reject => Err(DataLoadError::ScoreOutOfRange {
            row,
            column: column.header().to_string(),
            value: whole,
        }),
        OutOfRangePolicy::Clamp => {
            log::warn!("Row {row}: '{column}' value {whole} clamped into {lo}..={hi}");
            Ok(Some(whole.clamp(lo, hi) as u8))
        }
    }
}

// ---------------------------------------------------------------------------
// Workbook reader
// ---------------------------------------------------------------------------

fn read_workbook(path: &Path, sheet: &str) -> Result<RawTable, DataLoadError> {
    let workbook_err = |source| DataLoadError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;

    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet) {
        return Err(DataLoadError::SheetNotFound {
            sheet: sheet.to_string(),
            available: names.join(", "),
        });
    }

    let range = workbook.worksheet_range(sheet).map_err(workbook_err)?;
    raw_from_range(&range)
}

/// First row of the used range is the header.
fn raw_from_range(range: &Range<Data>) -> Result<RawTable, DataLoadError> {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or(DataLoadError::EmptySheet)?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();
    let rows = rows
        .map(|r| r.iter().map(cell_from_data).collect())
        .collect();
    Ok(RawTable { headers, rows })
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::text(s),
        other => Cell::text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<RawTable, DataLoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::text).collect());
    }
    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
fn read_json(path: &Path) -> Result<RawTable, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root
        .as_array()
        .ok_or_else(|| DataLoadError::Layout("expected a top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataLoadError::Layout(format!("record {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map_or(Cell::Empty, cell_from_json))
                .collect()
        })
        .collect();
    Ok(RawTable { headers, rows })
}

fn cell_from_json(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Empty,
        JsonValue::Number(n) => n.as_f64().map_or(Cell::Empty, Cell::Number),
        JsonValue::String(s) => Cell::text(s),
        other => Cell::text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); numeric columns of any width are read
/// as `f64`, everything else as text.
fn read_parquet(path: &Path) -> Result<RawTable, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    let reader = builder.build()?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for batch in reader {
        let batch = batch?;
        let columns = batch
            .columns()
            .iter()
            .map(arrow_cells)
            .collect::<Result<Vec<_>, _>>()?;
        for row in 0..batch.num_rows() {
            rows.push(columns.iter().map(|c| c[row].clone()).collect());
        }
    }
    Ok(RawTable { headers, rows })
}

fn arrow_cells(col: &ArrayRef) -> Result<Vec<Cell>, DataLoadError> {
    if col.data_type().is_numeric() {
        let cast = arrow::compute::cast(col, &DataType::Float64)?;
        let arr = cast.as_primitive::<Float64Type>();
        Ok((0..arr.len())
            .map(|i| {
                if arr.is_null(i) {
                    Cell::Empty
                } else {
                    Cell::Number(arr.value(i))
                }
            })
            .collect())
    } else {
        let cast = arrow::compute::cast(col, &DataType::Utf8)?;
        let arr = cast.as_string::<i32>();
        Ok((0..arr.len())
            .map(|i| {
                if arr.is_null(i) {
                    Cell::Empty
                } else {
                    Cell::text(arr.value(i))
                }
            })
            .collect())
    }
}
