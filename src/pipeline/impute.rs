//! Missing value imputation
//!
//! [`SimpleImputer`] fills numeric columns with a per-column statistic
//! (mean, median, most frequent, or a constant). [`MostFrequentImputer`]
//! fills categorical columns with the per-column mode. Statistics come from
//! observed values only and are frozen at fit time.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::error::{FitTransformError, TransformError};
use super::frame::{CategoricalBlock, NumericBlock};
use super::traits::{FittedTransformer, Transformer};

/// Strategy for filling missing numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ImputeStrategy {
    Mean,
    #[default]
    Median,
    /// Ties resolve to the smallest value.
    MostFrequent,
    Constant(f64),
}

impl ImputeStrategy {
    fn statistic_name(&self) -> &'static str {
        match self {
            ImputeStrategy::Mean => "mean",
            ImputeStrategy::Median => "median",
            ImputeStrategy::MostFrequent => "most frequent value",
            ImputeStrategy::Constant(_) => "constant",
        }
    }
}

/// Numeric imputer (unfit).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
}

impl SimpleImputer {
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self { strategy }
    }
}

/// Numeric imputer with frozen fill values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedSimpleImputer {
    strategy: ImputeStrategy,
    columns: Vec<String>,
    statistics: Vec<f64>,
}

impl FittedSimpleImputer {
    /// Fill value for each column, in column order.
    pub fn statistics(&self) -> &[f64] {
        &self.statistics
    }
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    } else {
        values[n / 2]
    }
}

fn most_frequent_number(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mut best = values[0];
    let mut best_count = 0;
    let mut start = 0;
    while start < values.len() {
        let mut end = start;
        while end < values.len() && values[end] == values[start] {
            end += 1;
        }
        // strictly greater keeps the smallest value among ties
        if end - start > best_count {
            best_count = end - start;
            best = values[start];
        }
        start = end;
    }
    best
}

/// Most frequent string; ties resolve to the lexicographically smallest value.
fn most_frequent_category<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

impl Transformer for SimpleImputer {
    type Input = NumericBlock;
    type Output = Array2<f64>;
    type Fitted = FittedSimpleImputer;

    fn fit(&self, data: &NumericBlock) -> Result<FittedSimpleImputer, TransformError> {
        if data.n_rows() == 0 {
            return Err(FitTransformError::EmptyData {
                stage: "SimpleImputer",
            }
            .into());
        }

        let mut statistics = Vec::with_capacity(data.n_columns());
        for (name, column) in data.names.iter().zip(&data.columns) {
            if let ImputeStrategy::Constant(value) = self.strategy {
                statistics.push(value);
                continue;
            }

            let mut observed: Vec<f64> = column.iter().flatten().copied().collect();
            if observed.is_empty() {
                return Err(FitTransformError::AllMissing {
                    column: name.clone(),
                    statistic: self.strategy.statistic_name(),
                }
                .into());
            }

            let statistic = match self.strategy {
                ImputeStrategy::Mean => observed.iter().sum::<f64>() / observed.len() as f64,
                ImputeStrategy::Median => median(&mut observed),
                ImputeStrategy::MostFrequent => most_frequent_number(&mut observed),
                ImputeStrategy::Constant(value) => value,
            };
            statistics.push(statistic);
        }

        tracing::debug!(
            strategy = self.strategy.statistic_name(),
            ?statistics,
            "Fitted numeric imputer"
        );

        Ok(FittedSimpleImputer {
            strategy: self.strategy,
            columns: data.names.clone(),
            statistics,
        })
    }
}

impl FittedTransformer for FittedSimpleImputer {
    type Input = NumericBlock;
    type Output = Array2<f64>;

    fn transform(&self, data: &NumericBlock) -> Result<Array2<f64>, TransformError> {
        if data.n_columns() != self.columns.len() {
            return Err(FitTransformError::FeatureMismatch {
                stage: "SimpleImputer",
                expected: self.columns.len(),
                got: data.n_columns(),
            }
            .into());
        }

        let rows = data.n_rows();
        let mut result = Array2::zeros((rows, self.columns.len()));
        for (col, (values, &fill)) in data.columns.iter().zip(&self.statistics).enumerate() {
            for (row, value) in values.iter().enumerate() {
                result[[row, col]] = value.unwrap_or(fill);
            }
        }
        Ok(result)
    }

    fn n_features_in(&self) -> usize {
        self.columns.len()
    }

    fn n_features_out(&self) -> usize {
        self.columns.len()
    }

    fn feature_names_out(&self) -> Vec<String> {
        self.columns.clone()
    }
}

/// Categorical columns with every missing value filled.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledCategories {
    pub names: Vec<String>,
    pub columns: Vec<Vec<String>>,
}

impl FilledCategories {
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }
}

/// Categorical imputer (unfit). Fills with the per-column mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MostFrequentImputer;

impl MostFrequentImputer {
    pub fn new() -> Self {
        Self
    }
}

/// Categorical imputer with frozen fill values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedMostFrequentImputer {
    columns: Vec<String>,
    fill_values: Vec<String>,
}

impl FittedMostFrequentImputer {
    /// Mode of each column, in column order.
    pub fn fill_values(&self) -> &[String] {
        &self.fill_values
    }
}

impl Transformer for MostFrequentImputer {
    type Input = CategoricalBlock;
    type Output = FilledCategories;
    type Fitted = FittedMostFrequentImputer;

    fn fit(&self, data: &CategoricalBlock) -> Result<FittedMostFrequentImputer, TransformError> {
        if data.n_rows() == 0 {
            return Err(FitTransformError::EmptyData {
                stage: "MostFrequentImputer",
            }
            .into());
        }

        let fill_values = data
            .names
            .iter()
            .zip(&data.columns)
            .map(|(name, column)| {
                most_frequent_category(column.iter().flatten().map(String::as_str)).ok_or_else(
                    || FitTransformError::AllMissing {
                        column: name.clone(),
                        statistic: "most frequent value",
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(?fill_values, "Fitted categorical imputer");

        Ok(FittedMostFrequentImputer {
            columns: data.names.clone(),
            fill_values,
        })
    }
}

impl FittedTransformer for FittedMostFrequentImputer {
    type Input = CategoricalBlock;
    type Output = FilledCategories;

    fn transform(&self, data: &CategoricalBlock) -> Result<FilledCategories, TransformError> {
        if data.n_columns() != self.columns.len() {
            return Err(FitTransformError::FeatureMismatch {
                stage: "MostFrequentImputer",
                expected: self.columns.len(),
                got: data.n_columns(),
            }
            .into());
        }

        let columns = data
            .columns
            .iter()
            .zip(&self.fill_values)
            .map(|(values, fill)| {
                values
                    .iter()
                    .map(|v| v.clone().unwrap_or_else(|| fill.clone()))
                    .collect()
            })
            .collect();

        Ok(FilledCategories {
            names: self.columns.clone(),
            columns,
        })
    }

    fn n_features_in(&self) -> usize {
        self.columns.len()
    }

    fn n_features_out(&self) -> usize {
        self.columns.len()
    }

    fn feature_names_out(&self) -> Vec<String> {
        self.columns.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_block() -> NumericBlock {
        // [[1, NaN], [3, 4], [5, 6], [5, 4]]
        NumericBlock {
            names: vec!["a".to_string(), "b".to_string()],
            columns: vec![
                vec![Some(1.0), Some(3.0), Some(5.0), Some(5.0)],
                vec![None, Some(4.0), Some(6.0), Some(4.0)],
            ],
        }
    }

    fn categorical_block() -> CategoricalBlock {
        let col = |values: &[Option<&str>]| -> Vec<Option<String>> {
            values.iter().map(|v| v.map(str::to_string)).collect()
        };
        CategoricalBlock {
            names: vec!["gender".to_string(), "lunch".to_string()],
            columns: vec![
                col(&[Some("male"), Some("female"), Some("female"), None]),
                col(&[Some("standard"), None, Some("free"), Some("free")]),
            ],
        }
    }

    #[test]
    fn test_median_statistics() {
        let fitted = SimpleImputer::new(ImputeStrategy::Median)
            .fit(&numeric_block())
            .unwrap();

        // a: median of [1, 3, 5, 5] = 4; b: median of [4, 6, 4] = 4
        assert_eq!(fitted.statistics(), &[4.0, 4.0]);
    }

    #[test]
    fn test_mean_statistics() {
        let fitted = SimpleImputer::new(ImputeStrategy::Mean)
            .fit(&numeric_block())
            .unwrap();

        assert!((fitted.statistics()[0] - 3.5).abs() < 1e-12);
        assert!((fitted.statistics()[1] - 14.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_most_frequent_number_prefers_smallest_tie() {
        let mut values = vec![3.0, 1.0, 3.0, 1.0, 2.0];
        assert_eq!(most_frequent_number(&mut values), 1.0);
    }

    #[test]
    fn test_constant_strategy_ignores_all_missing() {
        let block = NumericBlock {
            names: vec!["empty".to_string()],
            columns: vec![vec![None, None]],
        };
        let fitted = SimpleImputer::new(ImputeStrategy::Constant(-1.0))
            .fit(&block)
            .unwrap();
        let out = fitted.transform(&block).unwrap();

        assert_eq!(out.column(0).to_vec(), vec![-1.0, -1.0]);
    }

    #[test]
    fn test_transform_fills_missing_only() {
        let data = numeric_block();
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data).unwrap();
        let out = fitted.transform(&data).unwrap();

        assert_eq!(out.shape(), &[4, 2]);
        assert_eq!(out.column(0).to_vec(), vec![1.0, 3.0, 5.0, 5.0]);
        assert_eq!(out.column(1).to_vec(), vec![4.0, 4.0, 6.0, 4.0]);
    }

    #[test]
    fn test_all_missing_numeric_column_fails() {
        let block = NumericBlock {
            names: vec!["empty".to_string()],
            columns: vec![vec![None, None, None]],
        };
        let result = SimpleImputer::new(ImputeStrategy::Median).fit(&block);

        assert!(matches!(
            result,
            Err(TransformError::FitTransform(FitTransformError::AllMissing { .. }))
        ));
    }

    #[test]
    fn test_empty_block_fails() {
        let block = NumericBlock {
            names: vec!["a".to_string()],
            columns: vec![vec![]],
        };
        assert!(SimpleImputer::default().fit(&block).is_err());
    }

    #[test]
    fn test_feature_mismatch() {
        let fitted = SimpleImputer::default().fit(&numeric_block()).unwrap();
        let narrow = NumericBlock {
            names: vec!["a".to_string()],
            columns: vec![vec![Some(1.0)]],
        };

        assert!(matches!(
            fitted.transform(&narrow),
            Err(TransformError::FitTransform(
                FitTransformError::FeatureMismatch {
                    expected: 2,
                    got: 1,
                    ..
                }
            ))
        ));
    }

    #[test]
    fn test_mode_statistics() {
        let fitted = MostFrequentImputer::new().fit(&categorical_block()).unwrap();

        assert_eq!(fitted.fill_values(), &["female", "free"]);
    }

    #[test]
    fn test_mode_tie_prefers_smallest() {
        let block = CategoricalBlock {
            names: vec!["c".to_string()],
            columns: vec![vec![
                Some("zebra".to_string()),
                Some("apple".to_string()),
                None,
            ]],
        };
        let fitted = MostFrequentImputer::new().fit(&block).unwrap();

        assert_eq!(fitted.fill_values(), &["apple"]);
    }

    #[test]
    fn test_categorical_transform_fills_missing() {
        let data = categorical_block();
        let fitted = MostFrequentImputer::new().fit(&data).unwrap();
        let filled = fitted.transform(&data).unwrap();

        assert_eq!(filled.n_rows(), 4);
        assert_eq!(filled.columns[0][3], "female");
        assert_eq!(filled.columns[1][1], "free");
        assert_eq!(filled.columns[1][0], "standard");
    }

    #[test]
    fn test_all_missing_categorical_column_fails() {
        let block = CategoricalBlock {
            names: vec!["c".to_string()],
            columns: vec![vec![None, None]],
        };
        assert!(matches!(
            MostFrequentImputer::new().fit(&block),
            Err(TransformError::FitTransform(FitTransformError::AllMissing { .. }))
        ));
    }
}
