//! Tests for CSV table reading and writing.

use std::fs;

use survey_ingest::{CsvTable, read_csv_table, write_csv_table};
use tempfile::TempDir;

#[test]
fn reads_header_and_rows_with_trimming() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("input.csv");
    fs::write(
        &path,
        "\u{feff}name , location\nAteneo de Manila University,NCR\n , \n UST ,NCR\n",
    )
    .expect("write fixture");

    let table = read_csv_table(&path).expect("read table");
    assert_eq!(table.headers, vec!["name", "location"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(0, "name"), Some("Ateneo de Manila University"));
    assert_eq!(table.cell(1, "name"), Some("UST"));
}

#[test]
fn pads_short_rows_to_header_width() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("short.csv");
    fs::write(&path, "a,b,c\n1,2\n").expect("write fixture");

    let table = read_csv_table(&path).expect("read table");
    assert_eq!(table.rows[0], vec!["1", "2", ""]);
}

#[test]
fn empty_file_yields_empty_table() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").expect("write fixture");

    let table = read_csv_table(&path).expect("read table");
    assert!(table.headers.is_empty());
    assert!(table.rows.is_empty());
}

#[test]
fn write_then_read_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("out/nested/table.csv");

    let mut table = CsvTable::new(vec!["name".to_string(), "score".to_string()]);
    table.push_row(vec!["De La Salle University".to_string(), "0.8125".to_string()]);
    table.push_row(vec!["Xavier School".to_string(), String::new()]);

    write_csv_table(&path, &table).expect("write table");
    let back = read_csv_table(&path).expect("read back");
    assert_eq!(back, table);
}

#[test]
fn drop_columns_preserves_order() {
    let mut table = CsvTable::new(vec![
        "index".to_string(),
        "name".to_string(),
        "location".to_string(),
        "college_type".to_string(),
    ]);
    table.push_row(vec![
        "0".to_string(),
        "UP Diliman".to_string(),
        "NCR".to_string(),
        "local".to_string(),
    ]);

    let dropped = table.drop_columns(&["location", "college_type"]);
    assert_eq!(dropped.headers, vec!["index", "name"]);
    assert_eq!(dropped.rows[0], vec!["0", "UP Diliman"]);
}
