//! Tests for missing value analysis

use tabprep::pipeline::{columns_with_missing, count_missing, total_missing, ColumnSchema};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_count_missing_on_student_data() {
    let df = common::student_train_frame();
    let columns: Vec<String> = ColumnSchema::default().feature_columns().cloned().collect();

    let counts = count_missing(&df, &columns).unwrap();

    assert_eq!(counts.len(), 7);
    assert_eq!(counts[0], ("writing score".to_string(), 1));
    assert_eq!(total_missing(&counts), 1);
    assert_eq!(
        columns_with_missing(&counts),
        vec![("writing score".to_string(), 1)]
    );
}

#[test]
fn test_count_missing_test_split() {
    let df = common::student_test_frame();
    let counts = count_missing(&df, &["gender".to_string(), "lunch".to_string()]).unwrap();

    assert_eq!(
        counts,
        vec![("gender".to_string(), 1), ("lunch".to_string(), 0)]
    );
}

#[test]
fn test_count_missing_unknown_column() {
    let df = common::student_test_frame();
    assert!(count_missing(&df, &["nope".to_string()]).is_err());
}
