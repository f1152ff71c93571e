//! Missing value analysis

use polars::prelude::*;

use super::error::TransformError;

/// Count missing values for each of `columns`, in the given order.
///
/// Nulls and NaN both count as missing.
pub fn count_missing(
    df: &DataFrame,
    columns: &[String],
) -> Result<Vec<(String, usize)>, TransformError> {
    let mut counts = Vec::with_capacity(columns.len());

    for name in columns {
        let column = df.column(name)?;
        let mut missing = column.null_count();

        if matches!(column.dtype(), DataType::Float32 | DataType::Float64) {
            let floats = column.cast(&DataType::Float64)?;
            missing += floats
                .f64()?
                .into_iter()
                .filter(|v| v.is_some_and(f64::is_nan))
                .count();
        }

        counts.push((name.clone(), missing));
    }

    Ok(counts)
}

/// Columns with at least one missing value, most missing first.
pub fn columns_with_missing(counts: &[(String, usize)]) -> Vec<(String, usize)> {
    let mut flagged: Vec<(String, usize)> = counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .cloned()
        .collect();
    flagged.sort_by(|a, b| b.1.cmp(&a.1));
    flagged
}

/// Total number of missing cells across `counts`.
pub fn total_missing(counts: &[(String, usize)]) -> usize {
    counts.iter().map(|(_, n)| n).sum()
}
