//! Error types for the transformation pipeline.
//!
//! Each failure family has its own enum. They are unified in [`TransformError`]
//! and every orchestrator failure reaches the caller as a [`PipelineError`],
//! which records the stage that failed and where the failure was wrapped.

use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// A data source is missing, unreadable, or not parseable as a table.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Dataset not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Unsupported file format '{extension}' for {}. Supported formats: csv", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Failed to parse CSV file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// An expected column is absent, or the column schema itself is inconsistent.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Column '{column}' not found in {dataset} dataset. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        dataset: String,
        available: Vec<String>,
    },

    #[error("Target column '{column}' must be numeric")]
    NonNumericTarget { column: String },

    #[error("The {group} column group is empty")]
    EmptyGroup { group: &'static str },

    #[error("Column '{column}' is listed more than once in the schema")]
    DuplicateColumn { column: String },

    #[error("Target column '{column}' cannot also be a feature column")]
    TargetIsFeature { column: String },

    #[error("Failed to read schema file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A numerical failure while computing statistics or encoding values.
#[derive(Debug, Error)]
pub enum FitTransformError {
    #[error("Cannot fit {stage} on empty data")]
    EmptyData { stage: &'static str },

    #[error("Column '{column}' has no observed values to compute a {statistic} from")]
    AllMissing {
        column: String,
        statistic: &'static str,
    },

    #[error("Column '{column}' is declared numeric but contains non-numeric values")]
    NonNumeric { column: String },

    #[error("Feature mismatch in {stage}: expected {expected} columns, got {got}")]
    FeatureMismatch {
        stage: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Row count mismatch: {left} rows vs {right} rows")]
    RowMismatch { left: usize, right: usize },

    #[error("Unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

/// The fitted transformer could not be written or read back.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to create artifact directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write artifact {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode artifact: {0}")]
    Encode(#[source] bincode::Error),

    #[error("Failed to decode artifact {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("Artifact format version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Any failure the transformation pipeline can produce.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    FitTransform(#[from] FitTransformError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<PolarsError> for TransformError {
    fn from(err: PolarsError) -> Self {
        TransformError::FitTransform(FitTransformError::Polars(err))
    }
}

/// Orchestrator step in which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadData,
    BuildPreprocessor,
    SplitTarget,
    Fit,
    Transform,
    Persist,
    LoadArtifact,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::LoadData => "load data",
            Stage::BuildPreprocessor => "build preprocessor",
            Stage::SplitTarget => "split target",
            Stage::Fit => "fit",
            Stage::Transform => "transform",
            Stage::Persist => "persist artifact",
            Stage::LoadArtifact => "load artifact",
        };
        f.write_str(name)
    }
}

/// The single error type surfaced to callers of the orchestrator.
///
/// The typed cause stays inspectable through [`PipelineError::cause`] and
/// `std::error::Error::source`.
#[derive(Debug, Error)]
#[error("{stage} step failed at {location}: {source}")]
pub struct PipelineError {
    stage: Stage,
    location: &'static Location<'static>,
    #[source]
    source: TransformError,
}

impl PipelineError {
    #[track_caller]
    pub fn new(stage: Stage, source: impl Into<TransformError>) -> Self {
        Self {
            stage,
            location: Location::caller(),
            source: source.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn cause(&self) -> &TransformError {
        &self.source
    }
}

/// Attach a stage tag and the caller's source location to a failure.
pub trait StageContext<T> {
    fn at_stage(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T, E> StageContext<T> for Result<T, E>
where
    E: Into<TransformError>,
{
    #[track_caller]
    fn at_stage(self, stage: Stage) -> Result<T, PipelineError> {
        let location = Location::caller();
        self.map_err(|err| PipelineError {
            stage,
            location,
            source: err.into(),
        })
    }
}
