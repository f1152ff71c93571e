//! Persisted preprocessor artifact
//!
//! The fitted transformer is wrapped in a small envelope carrying the format
//! version, a creation timestamp and the column schema, then encoded with
//! bincode. The version is the first field, so it can be read and checked
//! before the rest of the payload is decoded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::column_transformer::FittedColumnTransformer;
use super::error::PersistenceError;
use super::schema::ColumnSchema;

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Default artifact location, relative to the working directory.
pub fn default_artifact_path() -> PathBuf {
    PathBuf::from("artifact").join("preprocessor.bin")
}

/// A fitted preprocessor together with the schema it was fit for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorArtifact {
    pub format_version: u32,
    /// RFC 3339 timestamp of when the artifact was produced.
    pub created_at: String,
    pub schema: ColumnSchema,
    pub transformer: FittedColumnTransformer,
}

impl PreprocessorArtifact {
    pub fn new(schema: ColumnSchema, transformer: FittedColumnTransformer) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            created_at: chrono::Local::now().to_rfc3339(),
            schema,
            transformer,
        }
    }

    /// Write the artifact to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        save_object(path, self)
    }

    /// Read an artifact back, rejecting unknown format versions.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let bytes = read_bytes(path)?;

        let found: u32 =
            bincode::deserialize(&bytes).map_err(|source| PersistenceError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        if found != ARTIFACT_FORMAT_VERSION {
            return Err(PersistenceError::VersionMismatch {
                expected: ARTIFACT_FORMAT_VERSION,
                found,
            });
        }

        bincode::deserialize(&bytes).map_err(|source| PersistenceError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Encode `value` with bincode and write it to `path`.
///
/// Parent directories are created as needed and an existing file is
/// overwritten.
pub fn save_object<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let bytes = bincode::serialize(value).map_err(PersistenceError::Encode)?;
    fs::write(path, &bytes).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote object");
    Ok(())
}

/// Read and decode a bincode-encoded value from `path`.
pub fn load_object<T: DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let bytes = read_bytes(path)?;
    bincode::deserialize(&bytes).map_err(|source| PersistenceError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, PersistenceError> {
    fs::read(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })
}
