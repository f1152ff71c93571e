//! Print what a persisted preprocessor learned

use std::path::Path;

use anyhow::Result;

use crate::pipeline::load_artifact;
use crate::report::{display_statistics, fitted_statistics};

pub fn run_inspect(artifact: &Path, json: bool) -> Result<()> {
    let preprocessor = load_artifact(artifact)?;
    let rows = fitted_statistics(&preprocessor);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        display_statistics(&preprocessor, &rows);
    }

    Ok(())
}
