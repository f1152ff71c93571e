//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Three training rows covering every column of the default student schema.
///
/// - `writing score`: one null, median of the observed values is 75
/// - `gender`: two categories, so two indicator columns
/// - `math score`: the target, `[60, 70, 80]`
pub fn student_train_frame() -> DataFrame {
    df! {
        "gender" => ["male", "female", "female"],
        "race/ethnicity" => ["group A", "group B", "group A"],
        "parental level of education" => ["some college", "high school", "master's degree"],
        "lunch" => ["standard", "free/reduced", "standard"],
        "test preparation course" => ["none", "completed", "none"],
        "math score" => [60i64, 70, 80],
        "reading score" => [65i64, 75, 85],
        "writing score" => [Some(70i64), Some(80), None],
    }
    .unwrap()
}

/// Two evaluation rows: one unseen race category, one missing gender.
pub fn student_test_frame() -> DataFrame {
    df! {
        "gender" => [None, Some("male")],
        "race/ethnicity" => [Some("group E"), Some("group B")],
        "parental level of education" => [Some("high school"), Some("some college")],
        "lunch" => [Some("standard"), Some("standard")],
        "test preparation course" => [Some("completed"), Some("none")],
        "math score" => [55i64, 90],
        "reading score" => [70i64, 90],
        "writing score" => [75i64, 95],
    }
    .unwrap()
}

/// Width of the transformed student arrays, target included.
///
/// 2 scaled numeric + gender 2 + race 2 + parental education 3 + lunch 2
/// + test preparation 2 + target.
pub const STUDENT_OUTPUT_COLUMNS: usize = 14;

/// Write `df` as CSV into `dir` under `name`.
pub fn write_csv(dir: &Path, name: &str, df: &mut DataFrame) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    path
}

/// A temporary directory holding the student train and test CSVs.
pub fn student_csv_pair() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let train = write_csv(temp_dir.path(), "train.csv", &mut student_train_frame());
    let test = write_csv(temp_dir.path(), "test.csv", &mut student_test_frame());
    (temp_dir, train, test)
}

/// Write raw CSV text to `dir/name`.
pub fn write_text(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Assert every column of `array` has mean 0 and population std 1 (or is constant 0).
pub fn assert_standardized(array: &ndarray::ArrayView2<f64>) {
    for (i, col) in array.columns().into_iter().enumerate() {
        let mean = col.mean().unwrap();
        let std = col.std(0.0);
        assert!(mean.abs() < 1e-9, "column {i} mean should be 0, got {mean}");
        assert!(
            (std - 1.0).abs() < 1e-9 || std < 1e-12,
            "column {i} std should be 1, got {std}"
        );
    }
}
