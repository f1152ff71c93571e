//! Unit tests for dataset loader and array writer

use ndarray::array;
use polars::prelude::*;
use tabprep::pipeline::{load_dataset, write_array_csv, DataLoadError};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::write_text;

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = write_text(temp_dir.path(), "test.csv", "a,b,c\n1,2,3\n4,5,6\n");

    let df = load_dataset(&csv_path, 100, &[]).unwrap();

    assert_eq!(df.height(), 2, "Should have 2 data rows");
    assert_eq!(column_names(&df), vec!["a", "b", "c"]);
}

#[test]
fn test_load_student_csv_keeps_column_types() {
    let (_dir, train, _) = common::student_csv_pair();
    let df = load_dataset(&train, 10000, &[]).unwrap();

    assert_eq!(df.height(), 3);
    assert!(df.column("math score").unwrap().dtype().is_primitive_numeric());
    assert_eq!(df.column("gender").unwrap().dtype(), &DataType::String);
    assert_eq!(df.column("writing score").unwrap().null_count(), 1);
}

#[test]
fn test_categorical_columns_read_as_text() {
    let (_dir, train, _) = common::student_csv_pair();
    let schema = tabprep::pipeline::ColumnSchema::default();
    let df = load_dataset(&train, 10000, &schema.categorical).unwrap();

    for name in &schema.categorical {
        assert_eq!(df.column(name).unwrap().dtype(), &DataType::String);
    }
    assert!(df.column("reading score").unwrap().dtype().is_primitive_numeric());
}

#[test]
fn test_full_scan_schema_inference() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = write_text(temp_dir.path(), "wide.csv", "x\n1\n2\n3.5\n");

    let df = load_dataset(&csv_path, 0, &[]).unwrap();
    assert_eq!(df.column("x").unwrap().dtype(), &DataType::Float64);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_dataset(&temp_dir.path().join("nope.csv"), 100, &[]).unwrap_err();

    assert!(matches!(err, DataLoadError::NotFound { .. }));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn test_load_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_text(temp_dir.path(), "data.json", "{}");

    let err = load_dataset(&path, 100, &[]).unwrap_err();
    assert!(matches!(
        err,
        DataLoadError::UnsupportedFormat { ref extension, .. } if extension == "json"
    ));
}

#[test]
fn test_load_empty_csv_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_text(temp_dir.path(), "empty.csv", "");

    let err = load_dataset(&path, 100, &[]).unwrap_err();
    assert!(matches!(err, DataLoadError::Parse { .. }));
}

#[test]
fn test_write_array_csv_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out").join("array.csv");
    let header = vec!["gender_female".to_string(), "math score".to_string()];

    write_array_csv(&array![[1.0, 60.0], [0.0, 70.0]], &header, &path).unwrap();

    let df = load_dataset(&path, 100, &[]).unwrap();
    assert_eq!(column_names(&df), header);
    let target: Vec<Option<f64>> = df
        .column("math score")
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(target, vec![Some(60.0), Some(70.0)]);
}
