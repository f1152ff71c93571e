//! Apply a persisted preprocessor to new records

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::{load_artifact, load_dataset, transform_records, write_array_csv};
use crate::utils::{create_spinner, finish_with_failure, finish_with_success};

/// Transform `input` with the artifact at `artifact` and write the array to `output`.
pub fn run_apply(
    artifact: &Path,
    input: &Path,
    output: &Path,
    infer_schema_length: usize,
) -> Result<()> {
    println!(
        "\n {} Applying fitted preprocessor",
        style("◆").cyan().bold()
    );
    println!("   Artifact: {}", style(artifact.display()).dim());
    println!("   Input:    {}", style(input.display()).dim());
    println!("   Output:   {}", style(output.display()).dim());
    println!();

    let preprocessor = load_artifact(artifact)?;

    let spinner = create_spinner("Transforming records...");
    let text_columns = &preprocessor.schema.categorical;
    let df = match load_dataset(input, infer_schema_length, text_columns) {
        Ok(df) => df,
        Err(err) => {
            finish_with_failure(&spinner);
            return Err(err).with_context(|| format!("Failed to read {}", input.display()));
        }
    };
    let records = match transform_records(&preprocessor, &df) {
        Ok(records) => records,
        Err(err) => {
            finish_with_failure(&spinner);
            return Err(err.into());
        }
    };
    finish_with_success(
        &spinner,
        &format!(
            "Transformed {} rows into {} columns",
            records.array.nrows(),
            records.array.ncols()
        ),
    );

    write_array_csv(&records.array, &records.header, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("   {} Written to {}", style("✓").green(), output.display());

    Ok(())
}
