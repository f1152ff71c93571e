//! Transformation orchestrator
//!
//! Loads the train and test datasets, fits a fresh preprocessor on the
//! training inputs, transforms both splits with that one fitted object,
//! appends the raw target and persists the fitted preprocessor.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ndarray::Array2;
use polars::prelude::DataFrame;

use super::artifact::{default_artifact_path, PreprocessorArtifact};
use super::builder::build_preprocessor;
use super::column_transformer::{hstack, ColumnTransformer};
use super::error::{FitTransformError, PipelineError, Stage, StageContext, TransformError};
use super::frame::target_values;
use super::loader::load_dataset;
use super::missing::count_missing;
use super::schema::ColumnSchema;
use super::traits::{FittedTransformer, Transformer};

/// Default number of rows used for CSV type inference.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10000;

/// Everything the orchestrator needs besides the two data sources.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTransformationConfig {
    pub artifact_path: PathBuf,
    pub schema: ColumnSchema,
    pub infer_schema_length: usize,
}

impl Default for DataTransformationConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
            schema: ColumnSchema::default(),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
        }
    }
}

impl DataTransformationConfig {
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = path.into();
        self
    }

    pub fn with_schema(mut self, schema: ColumnSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = rows;
        self
    }
}

/// Wall-clock time spent in each step of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepTimings {
    pub load: Duration,
    pub fit: Duration,
    pub transform: Duration,
    pub persist: Duration,
}

impl StepTimings {
    pub fn total(&self) -> Duration {
        self.load + self.fit + self.transform + self.persist
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct TransformationOutput {
    /// Transformed training features with the raw target as last column.
    pub train: Array2<f64>,
    /// Transformed test features with the raw target as last column.
    pub test: Array2<f64>,
    pub artifact_path: PathBuf,
    /// Names of the transformed feature columns, excluding the target.
    pub feature_names: Vec<String>,
    pub target: String,
    pub train_missing: Vec<(String, usize)>,
    pub test_missing: Vec<(String, usize)>,
    pub timings: StepTimings,
}

impl TransformationOutput {
    /// Column names of either output array.
    pub fn header(&self) -> Vec<String> {
        let mut header = self.feature_names.clone();
        header.push(self.target.clone());
        header
    }
}

/// The orchestrator. Holds configuration only; each run starts from a fresh
/// preprocessor.
#[derive(Debug, Clone, Default)]
pub struct DataTransformation {
    config: DataTransformationConfig,
}

impl DataTransformation {
    pub fn new(config: DataTransformationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DataTransformationConfig {
        &self.config
    }

    /// A new, unfit preprocessor for the configured schema.
    pub fn preprocessor(&self) -> Result<ColumnTransformer, PipelineError> {
        build_preprocessor(&self.config.schema).at_stage(Stage::BuildPreprocessor)
    }

    /// Run the whole transformation on two CSV files.
    ///
    /// Categorical columns are read as text so both splits share the same
    /// raw values regardless of per-file type inference.
    pub fn run(
        &self,
        train_path: &Path,
        test_path: &Path,
    ) -> Result<TransformationOutput, PipelineError> {
        let infer = self.config.infer_schema_length;
        let text_columns = &self.config.schema.categorical;

        let start = Instant::now();
        let train = load_dataset(train_path, infer, text_columns).at_stage(Stage::LoadData)?;
        let test = load_dataset(test_path, infer, text_columns).at_stage(Stage::LoadData)?;
        let load = start.elapsed();
        tracing::info!(
            train_rows = train.height(),
            test_rows = test.height(),
            "Read train and test data"
        );

        let mut output = self.run_frames(&train, &test)?;
        output.timings.load = load;
        Ok(output)
    }

    /// Run the transformation on frames that are already in memory.
    pub fn run_frames(
        &self,
        train: &DataFrame,
        test: &DataFrame,
    ) -> Result<TransformationOutput, PipelineError> {
        let schema = &self.config.schema;
        let mut timings = StepTimings::default();

        let preprocessor = self.preprocessor()?;
        tracing::info!("Obtained preprocessing object");

        let (train_inputs, train_target) =
            split_features_target(train, schema, "train").at_stage(Stage::SplitTarget)?;
        let (test_inputs, test_target) =
            split_features_target(test, schema, "test").at_stage(Stage::SplitTarget)?;

        let feature_columns: Vec<String> = schema.feature_columns().cloned().collect();
        let train_missing =
            count_missing(&train_inputs, &feature_columns).at_stage(Stage::SplitTarget)?;
        let test_missing =
            count_missing(&test_inputs, &feature_columns).at_stage(Stage::SplitTarget)?;

        let start = Instant::now();
        let fitted = preprocessor.fit(&train_inputs).at_stage(Stage::Fit)?;
        timings.fit = start.elapsed();

        tracing::info!("Applying preprocessing object on training and testing data");
        let start = Instant::now();
        let train_features = fitted.transform(&train_inputs).at_stage(Stage::Transform)?;
        let test_features = fitted.transform(&test_inputs).at_stage(Stage::Transform)?;
        let train_array = append_target(train_features, &train_target).at_stage(Stage::Transform)?;
        let test_array = append_target(test_features, &test_target).at_stage(Stage::Transform)?;
        timings.transform = start.elapsed();

        let feature_names = fitted.feature_names_out();
        let start = Instant::now();
        let artifact = PreprocessorArtifact::new(schema.clone(), fitted);
        artifact
            .save(&self.config.artifact_path)
            .at_stage(Stage::Persist)?;
        timings.persist = start.elapsed();
        tracing::info!(path = %self.config.artifact_path.display(), "Saved preprocessing object");

        Ok(TransformationOutput {
            train: train_array,
            test: test_array,
            artifact_path: self.config.artifact_path.clone(),
            feature_names,
            target: schema.target.clone(),
            train_missing,
            test_missing,
            timings,
        })
    }
}

/// Separate the input features from the target column.
///
/// Fails with a schema error if the target or any feature column is absent,
/// or if the target is not numeric.
pub fn split_features_target(
    df: &DataFrame,
    schema: &ColumnSchema,
    dataset: &str,
) -> Result<(DataFrame, Vec<f64>), TransformError> {
    schema.require_target(df, dataset)?;
    schema.require_features(df, dataset)?;

    let target = target_values(df, &schema.target)?;
    let inputs = df.drop(&schema.target)?;
    Ok((inputs, target))
}

/// Append `target` as the last column of `features`.
pub fn append_target(features: Array2<f64>, target: &[f64]) -> Result<Array2<f64>, TransformError> {
    if features.nrows() != target.len() {
        return Err(FitTransformError::RowMismatch {
            left: features.nrows(),
            right: target.len(),
        }
        .into());
    }

    let column = Array2::from_shape_vec((target.len(), 1), target.to_vec())
        .map_err(FitTransformError::from)?;
    hstack(&[features, column])
}

/// New records pushed through a persisted preprocessor.
#[derive(Debug, Clone)]
pub struct TransformedRecords {
    pub array: Array2<f64>,
    /// Column names of `array`; ends with the target when it was present.
    pub header: Vec<String>,
}

/// Read a persisted preprocessor artifact.
pub fn load_artifact(path: &Path) -> Result<PreprocessorArtifact, PipelineError> {
    let artifact = PreprocessorArtifact::load(path).at_stage(Stage::LoadArtifact)?;
    tracing::info!(
        path = %path.display(),
        created_at = %artifact.created_at,
        "Loaded preprocessing object"
    );
    Ok(artifact)
}

/// Transform new records with an already fitted preprocessor.
///
/// The target column is optional here. When present it is appended raw as
/// the last column, exactly like the training output.
pub fn transform_records(
    artifact: &PreprocessorArtifact,
    df: &DataFrame,
) -> Result<TransformedRecords, PipelineError> {
    let schema = &artifact.schema;
    schema.require_features(df, "input").at_stage(Stage::Transform)?;

    let features = artifact.transformer.transform(df).at_stage(Stage::Transform)?;
    let mut header = artifact.transformer.feature_names_out();

    let has_target = df.get_column_names().iter().any(|c| c.as_str() == schema.target);
    let array = if has_target {
        let target = target_values(df, &schema.target).at_stage(Stage::Transform)?;
        header.push(schema.target.clone());
        append_target(features, &target).at_stage(Stage::Transform)?
    } else {
        features
    };

    Ok(TransformedRecords { array, header })
}
