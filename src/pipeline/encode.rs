//! One-hot encoding for categorical features.
//!
//! Each input column expands into one indicator per category seen at fit
//! time. Categories are kept sorted, so the output layout depends only on the
//! training vocabulary and never on the data being transformed.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::error::{FitTransformError, TransformError};
use super::impute::FilledCategories;
use super::traits::{FittedTransformer, Transformer};

/// Strategy for categories that were not seen during fit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Fail the transform.
    Error,
    /// Emit an all-zero indicator block for that column.
    #[default]
    Ignore,
}

/// One-hot encoder (unfit).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OneHotEncoder {
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedOneHotEncoder {
    columns: Vec<String>,
    /// Sorted unique values for each input column.
    categories: Vec<Vec<String>>,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Vocabulary learned for each column.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }
}

impl Transformer for OneHotEncoder {
    type Input = FilledCategories;
    type Output = Array2<f64>;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &FilledCategories) -> Result<FittedOneHotEncoder, TransformError> {
        if data.n_rows() == 0 {
            return Err(FitTransformError::EmptyData {
                stage: "OneHotEncoder",
            }
            .into());
        }

        let categories: Vec<Vec<String>> = data
            .columns
            .iter()
            .map(|values| {
                let mut vocabulary = values.clone();
                vocabulary.sort();
                vocabulary.dedup();
                vocabulary
            })
            .collect();

        for (name, vocabulary) in data.names.iter().zip(&categories) {
            tracing::debug!(
                column = %name,
                categories = vocabulary.len(),
                "Fitted one-hot vocabulary"
            );
        }

        Ok(FittedOneHotEncoder {
            columns: data.names.clone(),
            categories,
            handle_unknown: self.handle_unknown,
        })
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = FilledCategories;
    type Output = Array2<f64>;

    fn transform(&self, data: &FilledCategories) -> Result<Array2<f64>, TransformError> {
        if data.columns.len() != self.columns.len() {
            return Err(FitTransformError::FeatureMismatch {
                stage: "OneHotEncoder",
                expected: self.columns.len(),
                got: data.columns.len(),
            }
            .into());
        }

        let rows = data.n_rows();
        let mut result = Array2::zeros((rows, self.n_features_out()));
        let mut offset = 0;

        for (col, values) in data.columns.iter().enumerate() {
            let vocabulary = &self.categories[col];
            let mut unknown = 0usize;

            for (row, value) in values.iter().enumerate() {
                match vocabulary.binary_search(value) {
                    Ok(idx) => result[[row, offset + idx]] = 1.0,
                    Err(_) if self.handle_unknown == HandleUnknown::Error => {
                        return Err(FitTransformError::UnknownCategory {
                            column: self.columns[col].clone(),
                            value: value.clone(),
                        }
                        .into());
                    }
                    Err(_) => unknown += 1,
                }
            }

            if unknown > 0 {
                tracing::warn!(
                    column = %self.columns[col],
                    rows = unknown,
                    "Unseen categories encoded as all-zero indicators"
                );
            }
            offset += vocabulary.len();
        }

        Ok(result)
    }

    fn n_features_in(&self) -> usize {
        self.columns.len()
    }

    fn n_features_out(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// `<column>_<category>` for every indicator, e.g. `gender_female`.
    fn feature_names_out(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(&self.categories)
            .flat_map(|(column, vocabulary)| {
                vocabulary
                    .iter()
                    .map(move |category| format!("{column}_{category}"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn filled(names: &[&str], columns: &[&[&str]]) -> FilledCategories {
        FilledCategories {
            names: names.iter().map(|s| s.to_string()).collect(),
            columns: columns
                .iter()
                .map(|col| col.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_one_hot_single_column() {
        let data = filled(&["gender"], &[&["male", "female", "female"]]);
        let fitted = OneHotEncoder::new().fit(&data).unwrap();

        assert_eq!(fitted.categories()[0], vec!["female", "male"]);
        assert_eq!(
            fitted.transform(&data).unwrap(),
            array![[0.0, 1.0], [1.0, 0.0], [1.0, 0.0]]
        );
    }

    #[test]
    fn test_one_hot_multiple_columns_offsets() {
        let data = filled(
            &["gender", "lunch"],
            &[&["male", "female"], &["standard", "free/reduced"]],
        );
        let fitted = OneHotEncoder::new().fit(&data).unwrap();

        assert_eq!(fitted.n_features_out(), 4);
        assert_eq!(
            fitted.transform(&data).unwrap(),
            array![[0.0, 1.0, 0.0, 1.0], [1.0, 0.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn test_unknown_category_ignored_keeps_width() {
        let train = filled(&["gender"], &[&["male", "female"]]);
        let test = filled(&["gender"], &[&["other"]]);
        let fitted = OneHotEncoder::new().fit(&train).unwrap();

        let encoded = fitted.transform(&test).unwrap();
        assert_eq!(encoded, array![[0.0, 0.0]]);
    }

    #[test]
    fn test_unknown_category_error() {
        let train = filled(&["gender"], &[&["male", "female"]]);
        let test = filled(&["gender"], &[&["other"]]);
        let fitted = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::Error)
            .fit(&train)
            .unwrap();

        assert!(matches!(
            fitted.transform(&test),
            Err(TransformError::FitTransform(
                FitTransformError::UnknownCategory { .. }
            ))
        ));
    }

    #[test]
    fn test_feature_names_out() {
        let data = filled(&["gender", "lunch"], &[&["male", "female"], &["free", "free"]]);
        let fitted = OneHotEncoder::new().fit(&data).unwrap();

        assert_eq!(
            fitted.feature_names_out(),
            vec!["gender_female", "gender_male", "lunch_free"]
        );
    }

    #[test]
    fn test_empty_data() {
        let data = filled(&["gender"], &[&[]]);
        assert!(OneHotEncoder::new().fit(&data).is_err());
    }

    #[test]
    fn test_empty_transform_keeps_width() {
        let fitted = OneHotEncoder::new()
            .fit(&filled(&["gender"], &[&["male", "female"]]))
            .unwrap();
        let empty = filled(&["gender"], &[&[]]);

        assert_eq!(fitted.transform(&empty).unwrap().dim(), (0, 2));
    }
}
