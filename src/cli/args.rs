//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::default_artifact_path;

/// tabprep - Fit a preprocessing transformer on train data and apply it to train and test
#[derive(Parser, Debug)]
#[command(name = "tabprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Training CSV file. The preprocessor is fit on this split only.
    #[arg(long)]
    pub train: Option<PathBuf>,

    /// Test CSV file, transformed with the preprocessor fit on the training split
    #[arg(long)]
    pub test: Option<PathBuf>,

    /// Where to write the fitted preprocessor
    #[arg(long, default_value_os_t = default_artifact_path())]
    pub artifact: PathBuf,

    /// JSON file with "numeric", "categorical" and "target" keys.
    /// Defaults to the built-in student-performance schema.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Directory for train_array.csv and test_array.csv.
    /// Arrays are not written to disk when omitted.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform new records with a persisted preprocessor
    Apply {
        /// Fitted preprocessor written by a previous run
        #[arg(long)]
        artifact: PathBuf,

        /// CSV file with the feature columns (target optional)
        #[arg(long)]
        input: PathBuf,

        /// CSV file to write the transformed array to
        #[arg(long)]
        output: PathBuf,

        /// Number of rows to use for schema inference.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Print the statistics learned by a persisted preprocessor
    Inspect {
        /// Fitted preprocessor written by a previous run
        #[arg(long)]
        artifact: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

impl Cli {
    /// Train and test paths, or an error naming the missing flag.
    pub fn sources(&self) -> Result<(&PathBuf, &PathBuf), String> {
        match (&self.train, &self.test) {
            (Some(train), Some(test)) => Ok((train, test)),
            (None, _) => {
                Err("Training data is required. Use --train to specify a CSV file.".into())
            }
            (_, None) => Err("Test data is required. Use --test to specify a CSV file.".into()),
        }
    }

    /// Output CSV paths inside `--output-dir`, if one was given.
    pub fn array_paths(&self) -> Option<(PathBuf, PathBuf)> {
        let dir = self.output_dir.as_ref()?;
        Some((dir.join("train_array.csv"), dir.join("test_array.csv")))
    }
}
