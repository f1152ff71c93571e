//! Typed column blocks extracted from a DataFrame
//!
//! Stages never work on the DataFrame directly: the numeric group reads a
//! [`NumericBlock`] of `Option<f64>` columns and the categorical group reads a
//! [`CategoricalBlock`] of `Option<String>` columns. `None` marks a missing value.

use polars::prelude::*;

use super::error::{FitTransformError, SchemaError, TransformError};

/// Column-major numeric values for a group of columns.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericBlock {
    pub names: Vec<String>,
    pub columns: Vec<Vec<Option<f64>>>,
}

impl NumericBlock {
    /// Select `names` from `df` as floats. NaN is treated as missing.
    pub fn from_frame(df: &DataFrame, names: &[String]) -> Result<Self, TransformError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let column = select_column(df, name)?;
            columns.push(numeric_values(column)?);
        }
        Ok(Self {
            names: names.to_vec(),
            columns,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Column-major categorical values for a group of columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalBlock {
    pub names: Vec<String>,
    pub columns: Vec<Vec<Option<String>>>,
}

impl CategoricalBlock {
    /// Select `names` from `df` as strings. Numeric columns are rendered as text.
    pub fn from_frame(df: &DataFrame, names: &[String]) -> Result<Self, TransformError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let column = select_column(df, name)?;
            columns.push(string_values(column)?);
        }
        Ok(Self {
            names: names.to_vec(),
            columns,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}

fn select_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, SchemaError> {
    df.column(name).map_err(|_| SchemaError::MissingColumn {
        column: name.to_string(),
        dataset: "input".to_string(),
        available: df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}

fn numeric_values(column: &Column) -> Result<Vec<Option<f64>>, FitTransformError> {
    let non_numeric = || FitTransformError::NonNumeric {
        column: column.name().to_string(),
    };

    let float_col = match column.dtype() {
        dtype if dtype.is_primitive_numeric() => column.cast(&DataType::Float64)?,
        DataType::Null => column.cast(&DataType::Float64)?,
        // CSV inference yields String for a column with stray text or no values at all
        DataType::String => column
            .strict_cast(&DataType::Float64)
            .map_err(|_| non_numeric())?,
        _ => return Err(non_numeric()),
    };

    Ok(float_col
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

fn string_values(column: &Column) -> Result<Vec<Option<String>>, FitTransformError> {
    let string_col = column.cast(&DataType::String)?;
    Ok(string_col
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Read the target column as raw floats; missing values become NaN.
pub fn target_values(df: &DataFrame, target: &str) -> Result<Vec<f64>, TransformError> {
    let column = select_column(df, target)?;
    let values = numeric_values(column).map_err(|err| match err {
        FitTransformError::NonNumeric { column } => {
            TransformError::Schema(SchemaError::NonNumericTarget { column })
        }
        other => TransformError::FitTransform(other),
    })?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df! {
            "score" => [Some(70i64), Some(80), None],
            "ratio" => [Some(0.5f64), Some(f64::NAN), Some(1.5)],
            "gender" => [Some("male"), None, Some("female")],
            "code" => [1i32, 2, 1],
        }
        .unwrap()
    }

    #[test]
    fn test_numeric_block_casts_integers_and_keeps_nulls() {
        let df = sample_frame();
        let block = NumericBlock::from_frame(&df, &["score".to_string()]).unwrap();

        assert_eq!(block.n_rows(), 3);
        assert_eq!(block.columns[0], vec![Some(70.0), Some(80.0), None]);
    }

    #[test]
    fn test_numeric_block_treats_nan_as_missing() {
        let df = sample_frame();
        let block = NumericBlock::from_frame(&df, &["ratio".to_string()]).unwrap();

        assert_eq!(block.columns[0], vec![Some(0.5), None, Some(1.5)]);
    }

    #[test]
    fn test_numeric_block_rejects_text_column() {
        let df = sample_frame();
        let result = NumericBlock::from_frame(&df, &["gender".to_string()]);

        assert!(matches!(
            result,
            Err(TransformError::FitTransform(FitTransformError::NonNumeric { .. }))
        ));
    }

    #[test]
    fn test_categorical_block_renders_numbers_as_text() {
        let df = sample_frame();
        let names = vec!["gender".to_string(), "code".to_string()];
        let block = CategoricalBlock::from_frame(&df, &names).unwrap();

        assert_eq!(block.n_columns(), 2);
        assert_eq!(
            block.columns[0],
            vec![Some("male".to_string()), None, Some("female".to_string())]
        );
        assert_eq!(block.columns[1][0].as_deref(), Some("1"));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let df = sample_frame();
        let result = CategoricalBlock::from_frame(&df, &["city".to_string()]);

        assert!(matches!(
            result,
            Err(TransformError::Schema(SchemaError::MissingColumn { .. }))
        ));
    }

    #[test]
    fn test_target_values_fill_nan() {
        let df = sample_frame();
        let target = target_values(&df, "score").unwrap();

        assert_eq!(&target[..2], &[70.0, 80.0]);
        assert!(target[2].is_nan());
    }

    #[test]
    fn test_non_numeric_target() {
        let df = sample_frame();
        assert!(matches!(
            target_values(&df, "gender"),
            Err(TransformError::Schema(SchemaError::NonNumericTarget { .. }))
        ));
    }
}
