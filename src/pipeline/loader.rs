//! Dataset loader for CSV files, plus a CSV writer for output arrays

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use ndarray::Array2;
use polars::prelude::*;

use super::error::{DataLoadError, FitTransformError, PersistenceError, TransformError};

/// Tokens read as missing in addition to empty fields.
pub const NULL_TOKENS: [&str; 4] = ["NA", "N/A", "NaN", "null"];

/// Load a CSV dataset into memory.
///
/// `infer_schema_length` is the number of rows polars reads to guess column
/// types; `0` scans the whole file. Columns named in `text_columns` are read
/// as raw strings instead of being inferred, so categorical values keep the
/// exact text of the file whatever the other rows look like.
pub fn load_dataset(
    path: &Path,
    infer_schema_length: usize,
    text_columns: &[String],
) -> Result<DataFrame, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "csv" {
        return Err(DataLoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    let parse_error = |source| DataLoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let infer = (infer_schema_length > 0).then_some(infer_schema_length);
    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());

    let reader = || {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(infer)
            .with_null_values(Some(null_values.clone()))
    };

    // Only overwrite columns the file actually has
    let inferred = reader()
        .finish()
        .and_then(|mut lf| lf.collect_schema())
        .map_err(parse_error)?;
    let overwrite: Schema = text_columns
        .iter()
        .filter(|name| inferred.contains(name.as_str()))
        .map(|name| Field::new(name.as_str().into(), DataType::String))
        .collect();

    let df = reader()
        .with_dtype_overwrite(Some(Arc::new(overwrite)))
        .finish()
        .map_err(parse_error)?
        .collect()
        .map_err(parse_error)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Loaded dataset"
    );
    Ok(df)
}

/// Write a numeric array to CSV with the given header.
pub fn write_array_csv(
    array: &Array2<f64>,
    header: &[String],
    path: &Path,
) -> Result<(), TransformError> {
    if header.len() != array.ncols() {
        return Err(FitTransformError::FeatureMismatch {
            stage: "CSV writer",
            expected: array.ncols(),
            got: header.len(),
        }
        .into());
    }

    let columns: Vec<Column> = header
        .iter()
        .zip(array.columns())
        .map(|(name, values)| Column::new(name.as_str().into(), values.to_vec()))
        .collect();
    let mut df = DataFrame::new(columns)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut file = File::create(path).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Write;

    #[test]
    fn test_null_tokens_are_missing() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "1,x").unwrap();
        writeln!(file, "NA,null").unwrap();
        writeln!(file, ",N/A").unwrap();
        file.flush().unwrap();

        let df = load_dataset(file.path(), 100, &[]).unwrap();
        assert_eq!(df.column("a").unwrap().null_count(), 2);
        assert_eq!(df.column("b").unwrap().null_count(), 2);
    }

    #[test]
    fn test_text_columns_keep_raw_values() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "x,c").unwrap();
        writeln!(file, "1,1.5").unwrap();
        writeln!(file, "2,2").unwrap();
        writeln!(file, "3,NA").unwrap();
        file.flush().unwrap();

        let text = vec!["c".to_string(), "absent".to_string()];
        let df = load_dataset(file.path(), 100, &text).unwrap();

        assert!(df.column("x").unwrap().dtype().is_primitive_numeric());
        let c = df.column("c").unwrap();
        assert_eq!(c.dtype(), &DataType::String);
        let values: Vec<Option<&str>> = c.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("1.5"), Some("2"), None]);
    }

    #[test]
    fn test_write_array_header_mismatch() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let result = write_array_csv(&array![[1.0, 2.0]], &["only".to_string()], file.path());
        assert!(result.is_err());
    }
}
