//! Transformation summary report

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{columns_with_missing, total_missing, TransformationOutput};
use crate::utils::format_duration;

/// Summary of one transformation run
#[derive(Debug, Default)]
pub struct TransformationSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub numeric_features: usize,
    pub indicator_features: usize,
    pub missing_train: Vec<(String, usize)>,
    pub missing_test: Vec<(String, usize)>,
    pub artifact_path: PathBuf,
    pub timings: Vec<(&'static str, Duration)>,
}

impl TransformationSummary {
    pub fn from_output(output: &TransformationOutput, numeric_features: usize) -> Self {
        let timings = &output.timings;
        Self {
            train_rows: output.train.nrows(),
            test_rows: output.test.nrows(),
            numeric_features,
            indicator_features: output.feature_names.len().saturating_sub(numeric_features),
            missing_train: columns_with_missing(&output.train_missing),
            missing_test: columns_with_missing(&output.test_missing),
            artifact_path: output.artifact_path.clone(),
            timings: vec![
                ("Load", timings.load),
                ("Fit", timings.fit),
                ("Transform", timings.transform),
                ("Persist", timings.persist),
            ],
        }
    }

    /// Width of each output array, target included.
    pub fn output_columns(&self) -> usize {
        self.numeric_features + self.indicator_features + 1
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("TRANSFORMATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("🚂 Train Rows"), Cell::new(self.train_rows)]);
        table.add_row(vec![Cell::new("🧪 Test Rows"), Cell::new(self.test_rows)]);
        table.add_row(vec![
            Cell::new("🔢 Scaled Numeric Columns"),
            Cell::new(self.numeric_features),
        ]);
        table.add_row(vec![
            Cell::new("🏷️  Indicator Columns"),
            Cell::new(self.indicator_features),
        ]);

        let train_missing = total_missing(&self.missing_train);
        let test_missing = total_missing(&self.missing_test);
        table.add_row(vec![
            Cell::new("🕳️  Imputed Cells (train / test)"),
            Cell::new(format!("{} / {}", train_missing, test_missing)).fg(
                if train_missing + test_missing == 0 {
                    Color::White
                } else {
                    Color::Yellow
                },
            ),
        ]);

        table.add_row(vec![
            Cell::new("✅ Output Columns"),
            Cell::new(self.output_columns())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("💾 Artifact"),
            Cell::new(self.artifact_path.display()),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.missing_train.is_empty() || !self.missing_test.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("IMPUTED COLUMNS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            print_missing("Train", &self.missing_train);
            print_missing("Test", &self.missing_test);
        }

        println!();
        let mut timing_table = Table::new();
        timing_table.load_preset(UTF8_FULL_CONDENSED);
        timing_table.set_header(vec![
            Cell::new("Step").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
        ]);
        for (step, elapsed) in &self.timings {
            timing_table.add_row(vec![Cell::new(step), Cell::new(format_duration(*elapsed))]);
        }
        for line in timing_table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

fn print_missing(split: &str, columns: &[(String, usize)]) {
    if columns.is_empty() {
        return;
    }
    println!();
    println!(
        "      {} {}:",
        style(split).yellow(),
        style(format!("({})", columns.len())).dim()
    );
    for (column, count) in columns {
        println!("        {} {} {}", style("•").dim(), column, style(count).dim());
    }
}
