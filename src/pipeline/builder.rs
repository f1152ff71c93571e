//! Preprocessor builder
//!
//! Turns a [`ColumnSchema`] into an unfit [`ColumnTransformer`]: median
//! imputation and standard scaling for numeric columns, most-frequent
//! imputation and one-hot encoding for categorical columns.

use super::column_transformer::ColumnTransformer;
use super::encode::{HandleUnknown, OneHotEncoder};
use super::error::SchemaError;
use super::group::{CategoricalPipeline, GroupPipeline, NumericPipeline};
use super::impute::{ImputeStrategy, SimpleImputer};
use super::schema::ColumnSchema;

pub const NUMERIC_PIPELINE: &str = "num_pipeline";
pub const CATEGORICAL_PIPELINE: &str = "cat_pipeline";

/// Configurable builder for the preprocessing transformer.
#[derive(Debug, Clone)]
pub struct PreprocessorBuilder {
    schema: ColumnSchema,
    numeric_strategy: ImputeStrategy,
    handle_unknown: HandleUnknown,
}

impl PreprocessorBuilder {
    pub fn new(schema: ColumnSchema) -> Self {
        Self {
            schema,
            numeric_strategy: ImputeStrategy::Median,
            handle_unknown: HandleUnknown::Ignore,
        }
    }

    pub fn with_numeric_strategy(mut self, strategy: ImputeStrategy) -> Self {
        self.numeric_strategy = strategy;
        self
    }

    pub fn with_handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }

    /// Build a fresh, unfit transformer. No I/O and no data are involved.
    pub fn build(&self) -> Result<ColumnTransformer, SchemaError> {
        self.schema.validate()?;

        let numeric = NumericPipeline::new(
            self.schema.numeric.clone(),
            SimpleImputer::new(self.numeric_strategy),
        );
        let categorical = CategoricalPipeline::new(
            self.schema.categorical.clone(),
            OneHotEncoder::new().with_handle_unknown(self.handle_unknown),
        );

        tracing::info!(
            numeric = ?self.schema.numeric,
            categorical = ?self.schema.categorical,
            "Identified numeric and categorical columns"
        );

        Ok(ColumnTransformer::new()
            .with_transformer(NUMERIC_PIPELINE, GroupPipeline::Numeric(numeric))
            .with_transformer(CATEGORICAL_PIPELINE, GroupPipeline::Categorical(categorical)))
    }
}

/// Build the default preprocessor for `schema`.
pub fn build_preprocessor(schema: &ColumnSchema) -> Result<ColumnTransformer, SchemaError> {
    PreprocessorBuilder::new(schema.clone()).build()
}
