//! Column transformer: routes column groups to their pipelines and
//! concatenates the outputs side by side.
//!
//! Columns not claimed by any group are dropped. Output blocks appear in the
//! order the groups were added.

use ndarray::{concatenate, Array2, ArrayView2, Axis};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use super::error::{FitTransformError, TransformError};
use super::group::{FittedGroupPipeline, GroupPipeline};
use super::traits::{FittedTransformer, Transformer};

/// Unfit composite of named group pipelines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnTransformer {
    transformers: Vec<(String, GroupPipeline)>,
}

impl ColumnTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named group pipeline.
    pub fn with_transformer(mut self, name: impl Into<String>, pipeline: GroupPipeline) -> Self {
        self.transformers.push((name.into(), pipeline));
        self
    }

    pub fn transformers(&self) -> &[(String, GroupPipeline)] {
        &self.transformers
    }

    /// Every column consumed by some group, in output order.
    pub fn input_columns(&self) -> Vec<String> {
        self.transformers
            .iter()
            .flat_map(|(_, p)| p.columns().iter().cloned())
            .collect()
    }
}

/// Fitted composite whose group pipelines hold frozen statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedColumnTransformer {
    transformers: Vec<(String, FittedGroupPipeline)>,
}

impl FittedColumnTransformer {
    pub fn transformers(&self) -> &[(String, FittedGroupPipeline)] {
        &self.transformers
    }

    /// Look up a fitted group by name.
    pub fn named(&self, name: &str) -> Option<&FittedGroupPipeline> {
        self.transformers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    pub fn input_columns(&self) -> Vec<String> {
        self.transformers
            .iter()
            .flat_map(|(_, p)| p.columns().iter().cloned())
            .collect()
    }
}

impl Transformer for ColumnTransformer {
    type Input = DataFrame;
    type Output = Array2<f64>;
    type Fitted = FittedColumnTransformer;

    fn fit(&self, df: &DataFrame) -> Result<FittedColumnTransformer, TransformError> {
        if self.transformers.is_empty() {
            return Err(FitTransformError::EmptyData {
                stage: "ColumnTransformer",
            }
            .into());
        }

        let mut fitted = Vec::with_capacity(self.transformers.len());
        for (name, pipeline) in &self.transformers {
            let group = pipeline.fit(df)?;
            tracing::debug!(
                group = %name,
                features_in = group.n_features_in(),
                features_out = group.n_features_out(),
                "Fitted column group"
            );
            fitted.push((name.clone(), group));
        }

        Ok(FittedColumnTransformer {
            transformers: fitted,
        })
    }
}

impl FittedTransformer for FittedColumnTransformer {
    type Input = DataFrame;
    type Output = Array2<f64>;

    fn transform(&self, df: &DataFrame) -> Result<Array2<f64>, TransformError> {
        let blocks = self
            .transformers
            .iter()
            .map(|(_, p)| p.transform(df))
            .collect::<Result<Vec<_>, _>>()?;

        hstack(&blocks)
    }

    fn n_features_in(&self) -> usize {
        self.transformers.iter().map(|(_, p)| p.n_features_in()).sum()
    }

    fn n_features_out(&self) -> usize {
        self.transformers
            .iter()
            .map(|(_, p)| p.n_features_out())
            .sum()
    }

    fn feature_names_out(&self) -> Vec<String> {
        self.transformers
            .iter()
            .flat_map(|(_, p)| p.feature_names_out())
            .collect()
    }
}

/// Concatenate blocks column-wise after checking their row counts agree.
pub fn hstack(blocks: &[Array2<f64>]) -> Result<Array2<f64>, TransformError> {
    let Some(first) = blocks.first() else {
        return Ok(Array2::zeros((0, 0)));
    };
    if let Some(bad) = blocks.iter().find(|b| b.nrows() != first.nrows()) {
        return Err(FitTransformError::RowMismatch {
            left: first.nrows(),
            right: bad.nrows(),
        }
        .into());
    }

    let views: Vec<ArrayView2<f64>> = blocks.iter().map(|b| b.view()).collect();
    Ok(concatenate(Axis(1), &views).map_err(FitTransformError::from)?)
}
