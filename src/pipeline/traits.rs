//! Core traits for preprocessing stages.
//!
//! - [`Transformer`]: unfit configuration; learns statistics from data.
//! - [`FittedTransformer`]: frozen statistics; transforms any number of inputs.
//!
//! Fitting consumes nothing: calling `fit` again on the same [`Transformer`]
//! yields a fresh fitted stage, which is how a refit overwrites old statistics.

use super::error::TransformError;

/// An unfit stage with hyperparameters only.
pub trait Transformer {
    /// Data the stage reads.
    type Input: ?Sized;
    /// Data the stage produces.
    type Output;
    /// The fitted counterpart.
    type Fitted: FittedTransformer<Input = Self::Input, Output = Self::Output>;

    /// Learn statistics from `data`.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, TransformError>;
}

/// A stage whose statistics are frozen.
pub trait FittedTransformer {
    type Input: ?Sized;
    type Output;

    /// Apply the learned statistics to `data`.
    ///
    /// # Errors
    /// Returns a [`TransformError`] if the input width differs from the
    /// width seen during fit, or if a value cannot be encoded.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, TransformError>;

    /// Number of input columns seen during fit.
    fn n_features_in(&self) -> usize;

    /// Number of output columns produced by `transform`.
    fn n_features_out(&self) -> usize;

    /// Names of the output columns, in output order.
    fn feature_names_out(&self) -> Vec<String>;
}
