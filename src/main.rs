//! tabprep: tabular preprocessing CLI
//!
//! Fits the preprocessing transformer on a training CSV, applies it to the
//! training and test CSVs, and saves the fitted transformer.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use tabprep::cli::{apply::run_apply, inspect::run_inspect, Cli, Commands};
use tabprep::pipeline::{
    write_array_csv, ColumnSchema, DataTransformation, DataTransformationConfig,
};
use tabprep::report::TransformationSummary;
use tabprep::utils::{
    create_spinner, finish_with_failure, finish_with_success, init_logging, print_banner,
    print_completion, print_config, print_info, print_step_header, print_step_time,
    print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Apply {
                artifact,
                input,
                output,
                infer_schema_length,
            } => run_apply(artifact, input, output, *infer_schema_length),
            Commands::Inspect { artifact, json } => run_inspect(artifact, *json),
        };
    }

    let (train, test) = cli.sources().map_err(anyhow::Error::msg)?;

    let schema = match &cli.schema {
        Some(path) => ColumnSchema::from_json_file(path)
            .with_context(|| format!("Failed to load schema from {}", path.display()))?,
        None => ColumnSchema::default(),
    };
    let numeric_features = schema.numeric.len();

    let config = DataTransformationConfig::default()
        .with_artifact_path(cli.artifact.clone())
        .with_schema(schema)
        .with_infer_schema_length(cli.infer_schema_length);

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(train, test, &config.schema.target, &config.artifact_path);

    // Step 1: fit on train, transform both splits, persist
    print_step_header(1, "Fit and Transform");
    let step_start = Instant::now();
    let spinner = create_spinner("Fitting preprocessor on training data...");
    let transformation = DataTransformation::new(config);
    let output = match transformation.run(train, test) {
        Ok(output) => output,
        Err(err) => {
            finish_with_failure(&spinner);
            return Err(err.into());
        }
    };
    finish_with_success(&spinner, "Preprocessor fitted and applied");
    print_success(&format!(
        "Saved fitted preprocessor to {}",
        output.artifact_path.display()
    ));
    print_step_time(step_start.elapsed());

    // Step 2: optional CSV export
    print_step_header(2, "Export Arrays");
    let step_start = Instant::now();
    match cli.array_paths() {
        Some((train_path, test_path)) => {
            let header = output.header();
            write_array_csv(&output.train, &header, &train_path)
                .with_context(|| format!("Failed to write {}", train_path.display()))?;
            write_array_csv(&output.test, &header, &test_path)
                .with_context(|| format!("Failed to write {}", test_path.display()))?;
            print_success(&format!("Wrote {}", train_path.display()));
            print_success(&format!("Wrote {}", test_path.display()));
        }
        None => print_info("No --output-dir given, arrays kept in memory only"),
    }
    print_step_time(step_start.elapsed());

    let summary = TransformationSummary::from_output(&output, numeric_features);
    summary.display();

    println!(
        "\n    {} {} features + target per row",
        style("✧").cyan(),
        style(output.feature_names.len()).yellow().bold()
    );
    print_completion();

    Ok(())
}
