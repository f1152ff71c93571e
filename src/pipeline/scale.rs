//! Standard Scaler (Z-score normalization).
//!
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the training mean and `s` the population standard deviation
//! (`ddof = 0`). Constant columns keep `s = 1` so they map to zero.

use ndarray::{aview1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::error::{FitTransformError, TransformError};
use super::traits::{FittedTransformer, Transformer};

/// Standard deviations below this are treated as zero variance.
const ZERO_VARIANCE: f64 = 10.0 * f64::EPSILON;

/// StandardScaler transformer (unfit).
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    with_mean: bool,
    with_std: bool,
    columns: Vec<String>,
}

impl StandardScaler {
    /// Scaler for the named columns, centering and scaling by default.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            with_mean: true,
            with_std: true,
            columns,
        }
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.with_std = with_std;
        self
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedStandardScaler {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl FittedStandardScaler {
    /// Per-column offsets (zeros when centering is disabled).
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Per-column divisors (ones when scaling is disabled).
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

impl Transformer for StandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Fitted = FittedStandardScaler;

    fn fit(&self, data: &Array2<f64>) -> Result<FittedStandardScaler, TransformError> {
        let (rows, cols) = data.dim();
        if rows == 0 {
            return Err(FitTransformError::EmptyData {
                stage: "StandardScaler",
            }
            .into());
        }
        if cols != self.columns.len() {
            return Err(FitTransformError::FeatureMismatch {
                stage: "StandardScaler",
                expected: self.columns.len(),
                got: cols,
            }
            .into());
        }

        let mean = if self.with_mean {
            data.mean_axis(Axis(0))
                .ok_or(FitTransformError::EmptyData {
                    stage: "StandardScaler",
                })?
                .to_vec()
        } else {
            vec![0.0; cols]
        };

        let scale = if self.with_std {
            data.std_axis(Axis(0), 0.0)
                .iter()
                .map(|&s| if s < ZERO_VARIANCE { 1.0 } else { s })
                .collect()
        } else {
            vec![1.0; cols]
        };

        tracing::debug!(?mean, ?scale, "Fitted standard scaler");

        Ok(FittedStandardScaler {
            columns: self.columns.clone(),
            mean,
            scale,
        })
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        let cols = data.ncols();
        if cols != self.columns.len() {
            return Err(FitTransformError::FeatureMismatch {
                stage: "StandardScaler",
                expected: self.columns.len(),
                got: cols,
            }
            .into());
        }

        let mut result = data.clone();
        result -= &aview1(&self.mean);
        result /= &aview1(&self.scale);
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
