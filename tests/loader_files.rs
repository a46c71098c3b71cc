//! Integration tests for loading region tables from files on disk.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;
use sa3_radar::data::loader::{load, load_file, OutOfRangePolicy, DEFAULT_SHEET};
use sa3_radar::data::model::ScoreColumn;
use sa3_radar::data::DataLoadError;

const HEADER: &str =
    "SA3,10Y Price Change,1M Price Change,Inventory Now,Inventory trend,Inventory Forecast,DOM,Dom Forecast";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

fn sample_csv(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "regions.csv",
        &format!("{HEADER}\nR1,5,4,3,5,2,1,4\nR2,1,1,1,1,1,1,1\n,,,,,,,\n"),
    )
}

#[test]
fn csv_source_loads_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_file(&sample_csv(dir.path()), DEFAULT_SHEET, OutOfRangePolicy::Reject).unwrap();
    let ids: Vec<&str> = table.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["R1", "R2"]);
    assert_eq!(table.find("R1").unwrap().scores.values(), &[5, 4, 3, 5, 2, 1, 4]);
}

#[test]
fn extra_columns_and_column_order_do_not_matter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "shuffled.csv",
        "Dom Forecast,DOM,State,SA3,Inventory Forecast,Inventory trend,Inventory Now,1M Price Change,10Y Price Change\n\
         4,1,NSW,R1,2,5,3,4,5\n",
    );
    let table = load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject).unwrap();
    assert_eq!(table.find("R1").unwrap().scores.values(), &[5, 4, 3, 5, 2, 1, 4]);
}

#[test]
fn json_records_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "regions.json",
        r#"[
            {"SA3": "Darwin City", "10Y Price Change": 2, "1M Price Change": 3,
             "Inventory Now": 4, "Inventory trend": 5, "Inventory Forecast": 1,
             "DOM": 2.0, "Dom Forecast": 3},
            {"SA3": "Launceston", "10Y Price Change": 1, "1M Price Change": null,
             "Inventory Now": 4, "Inventory trend": 5, "Inventory Forecast": 1,
             "DOM": 2, "Dom Forecast": 3}
        ]"#,
    );
    let table = load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.find("Darwin City").unwrap().score(ScoreColumn::DaysOnMarket),
        2
    );
}

#[test]
fn parquet_source_loads_integer_and_float_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.parquet");

    let mut fields = vec![Field::new("SA3", DataType::Utf8, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(StringArray::from(vec!["R1", "R2"]))];
    for (i, col) in ScoreColumn::ALL.iter().enumerate() {
        // Alternate types the way pandas exports mixed columns.
        if i % 2 == 0 {
            fields.push(Field::new(col.header(), DataType::Int64, false));
            arrays.push(Arc::new(Int64Array::from(vec![5 - i as i64 % 5, 1])));
        } else {
            fields.push(Field::new(col.header(), DataType::Float64, false));
            arrays.push(Arc::new(Float64Array::from(vec![3.0, 2.0])));
        }
    }
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject).unwrap();
    assert_eq!(table.find("R1").unwrap().scores.values(), &[5, 3, 3, 3, 1, 3, 4]);
    assert_eq!(table.find("R2").unwrap().scores.values(), &[1, 2, 1, 2, 1, 2, 1]);
}

/// Workbook with one sheet holding the header row and `R1,5,4,3,5,2,1,4`.
fn write_workbook(dir: &Path, sheet_name: &str) -> PathBuf {
    let path = dir.join("Region Charts Master.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).unwrap();
    for (col, header) in HEADER.split(',').enumerate() {
        sheet.write_string(0, col as u16, header).unwrap();
    }
    sheet.write_string(1, 0, "R1").unwrap();
    for (col, score) in [5, 4, 3, 5, 2, 1, 4].into_iter().enumerate() {
        sheet.write_number(1, col as u16 + 1, score).unwrap();
    }
    workbook.save(&path).unwrap();
    path
}

#[test]
fn xlsx_sheet_loads_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path(), DEFAULT_SHEET);
    let table = load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.find("R1").unwrap().scores.values(), &[5, 4, 3, 5, 2, 1, 4]);
}

#[test]
fn xlsx_without_the_sheet_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path(), "Other");
    match load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject) {
        Err(DataLoadError::SheetNotFound { sheet, available }) => {
            assert_eq!(sheet, DEFAULT_SHEET);
            assert_eq!(available, "Other");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_file(
        Path::new("no/such/Region Charts Master.xlsx"),
        DEFAULT_SHEET,
        OutOfRangePolicy::Reject,
    )
    .unwrap_err();
    assert!(matches!(err, DataLoadError::Io { .. }));
    assert!(err.to_string().contains("Region Charts Master.xlsx"));
}

#[test]
fn garbage_workbook_is_a_workbook_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "broken.xlsx", "this is not a zip archive");
    assert!(matches!(
        load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject),
        Err(DataLoadError::Workbook { .. })
    ));
}

#[test]
fn missing_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "short.csv", "SA3,DOM\nR1,3\n");
    match load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject) {
        Err(DataLoadError::MissingColumn(c)) => assert_eq!(c, "10Y Price Change"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "regions.txt", HEADER);
    assert!(matches!(
        load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject),
        Err(DataLoadError::UnsupportedExtension(ext)) if ext == "txt"
    ));
}

#[test]
fn out_of_range_is_rejected_or_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "hot.csv",
        &format!("{HEADER}\nR1,7,4,3,5,2,1,4\n"),
    );
    assert!(matches!(
        load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Reject),
        Err(DataLoadError::ScoreOutOfRange { row: 2, value: 7, .. })
    ));
    let table = load_file(&path, DEFAULT_SHEET, OutOfRangePolicy::Clamp).unwrap();
    assert_eq!(table.find("R1").unwrap().score(ScoreColumn::PriceChange10Y), 5);
}

/// The only test in this binary touching the process-wide cache.
#[test]
fn load_is_memoized() {
    let dir = tempfile::tempdir().unwrap();
    let first = load(&sample_csv(dir.path()), DEFAULT_SHEET, OutOfRangePolicy::Reject).unwrap();

    // A different (even missing) source is ignored once the table is cached.
    let second = load(Path::new("elsewhere.csv"), DEFAULT_SHEET, OutOfRangePolicy::Reject).unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(second.len(), 2);
}
