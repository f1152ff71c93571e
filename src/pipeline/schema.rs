//! Column schema: which columns are numeric, which are categorical, and the target

use std::collections::HashSet;
use std::path::Path;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::SchemaError;

/// Fixed partition of the feature columns plus the target column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub target: String,
}

impl Default for ColumnSchema {
    /// The student-performance schema: two score columns are scaled,
    /// five demographic columns are one-hot encoded, `math score` is predicted.
    fn default() -> Self {
        Self::new(
            ["writing score", "reading score"],
            [
                "gender",
                "race/ethnicity",
                "parental level of education",
                "lunch",
                "test preparation course",
            ],
            "math score",
        )
    }
}

impl ColumnSchema {
    pub fn new<N, C>(numeric: N, categorical: C, target: &str) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            numeric: numeric.into_iter().map(Into::into).collect(),
            categorical: categorical.into_iter().map(Into::into).collect(),
            target: target.to_string(),
        }
    }

    /// Read a schema from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let schema: ColumnSchema =
            serde_json::from_str(&text).map_err(|source| SchemaError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        schema.validate()?;
        Ok(schema)
    }

    /// Check that the schema is internally consistent.
    ///
    /// Both groups must be non-empty, no column may appear twice, and the
    /// target must not be a feature.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.numeric.is_empty() {
            return Err(SchemaError::EmptyGroup { group: "numeric" });
        }
        if self.categorical.is_empty() {
            return Err(SchemaError::EmptyGroup {
                group: "categorical",
            });
        }

        let mut seen = HashSet::new();
        for column in self.feature_columns() {
            if column == &self.target {
                return Err(SchemaError::TargetIsFeature {
                    column: column.clone(),
                });
            }
            if !seen.insert(column) {
                return Err(SchemaError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }

        Ok(())
    }

    /// Numeric columns followed by categorical columns.
    pub fn feature_columns(&self) -> impl Iterator<Item = &String> {
        self.numeric.iter().chain(self.categorical.iter())
    }

    pub fn n_features(&self) -> usize {
        self.numeric.len() + self.categorical.len()
    }

    /// Verify that a dataset carries every feature column of the schema.
    pub fn require_features(&self, df: &DataFrame, dataset: &str) -> Result<(), SchemaError> {
        let available = column_names(df);
        for column in self.feature_columns() {
            if !available.contains(column) {
                return Err(SchemaError::MissingColumn {
                    column: column.clone(),
                    dataset: dataset.to_string(),
                    available,
                });
            }
        }
        Ok(())
    }

    /// Verify that a dataset carries the target column.
    pub fn require_target(&self, df: &DataFrame, dataset: &str) -> Result<(), SchemaError> {
        let available = column_names(df);
        if available.contains(&self.target) {
            Ok(())
        } else {
            Err(SchemaError::MissingColumn {
                column: self.target.clone(),
                dataset: dataset.to_string(),
                available,
            })
        }
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_is_valid() {
        let schema = ColumnSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.n_features(), 7);
        assert_eq!(schema.target, "math score");
    }

    #[test]
    fn test_empty_numeric_group_rejected() {
        let schema = ColumnSchema::new(Vec::<String>::new(), ["gender"], "y");
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::EmptyGroup { group: "numeric" })
        ));
    }

    #[test]
    fn test_empty_categorical_group_rejected() {
        let schema = ColumnSchema::new(["age"], Vec::<String>::new(), "y");
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::EmptyGroup {
                group: "categorical"
            })
        ));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let schema = ColumnSchema::new(["age"], ["age"], "y");
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::DuplicateColumn { column }) if column == "age"
        ));
    }

    #[test]
    fn test_target_as_feature_rejected() {
        let schema = ColumnSchema::new(["age", "y"], ["city"], "y");
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::TargetIsFeature { column }) if column == "y"
        ));
    }

    #[test]
    fn test_require_features_reports_missing_column() {
        let df = df! {
            "age" => [1.0f64, 2.0],
            "y" => [0.0f64, 1.0],
        }
        .unwrap();
        let schema = ColumnSchema::new(["age"], ["city"], "y");

        let err = schema.require_features(&df, "test").unwrap_err();
        match err {
            SchemaError::MissingColumn {
                column, dataset, ..
            } => {
                assert_eq!(column, "city");
                assert_eq!(dataset, "test");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_require_target() {
        let df = df! { "age" => [1.0f64] }.unwrap();
        let schema = ColumnSchema::new(["age"], ["city"], "y");
        assert!(schema.require_target(&df, "train").is_err());
    }

    #[test]
    fn test_schema_json_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{"numeric": ["age"], "categorical": ["city"], "target": "price"}"#,
        )
        .unwrap();

        let schema = ColumnSchema::from_json_file(&path).unwrap();
        assert_eq!(schema, ColumnSchema::new(["age"], ["city"], "price"));
    }

    #[test]
    fn test_schema_json_invalid() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"numeric": ["age"]}"#).unwrap();

        assert!(matches!(
            ColumnSchema::from_json_file(&path),
            Err(SchemaError::Parse { .. })
        ));
    }
}
