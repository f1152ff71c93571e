//! Fitted-statistics report for a persisted preprocessor

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::{FittedGroupPipeline, PreprocessorArtifact};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// What the preprocessor learned about one input column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub column: String,
    pub kind: ColumnKind,
    /// Value substituted for missing entries.
    pub fill_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// Collect per-column statistics in output order.
pub fn fitted_statistics(artifact: &PreprocessorArtifact) -> Vec<ColumnStatistics> {
    let mut rows = Vec::new();

    for (_, group) in artifact.transformer.transformers() {
        match group {
            FittedGroupPipeline::Numeric(p) => {
                let scaler = p.scaler();
                let fills = p.imputer().statistics();
                let moments = scaler.mean().iter().zip(scaler.scale());
                let columns = p.columns().iter().zip(fills);
                for ((column, fill), (mean, scale)) in columns.zip(moments) {
                    rows.push(ColumnStatistics {
                        column: column.clone(),
                        kind: ColumnKind::Numeric,
                        fill_value: fill.to_string(),
                        mean: Some(*mean),
                        scale: Some(*scale),
                        categories: Vec::new(),
                    });
                }
            }
            FittedGroupPipeline::Categorical(p) => {
                let fills = p.imputer().fill_values();
                let vocabularies = p.encoder().categories();
                let columns = p.columns().iter().zip(fills);
                for ((column, fill), vocabulary) in columns.zip(vocabularies) {
                    rows.push(ColumnStatistics {
                        column: column.clone(),
                        kind: ColumnKind::Categorical,
                        fill_value: fill.clone(),
                        mean: None,
                        scale: None,
                        categories: vocabulary.clone(),
                    });
                }
            }
        }
    }

    rows
}

/// Print the statistics as a table
pub fn display_statistics(artifact: &PreprocessorArtifact, rows: &[ColumnStatistics]) {
    println!();
    println!(
        "    {} {}",
        style("🔎").cyan(),
        style("FITTED PREPROCESSOR").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!(
        "      Format v{}, created {}",
        artifact.format_version,
        style(&artifact.created_at).dim()
    );
    println!("      Target: {}", style(&artifact.schema.target).yellow());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Kind").add_attribute(Attribute::Bold),
        Cell::new("Fill").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Scale").add_attribute(Attribute::Bold),
        Cell::new("Categories").add_attribute(Attribute::Bold),
    ]);

    for row in rows {
        let kind = match row.kind {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        };
        table.add_row(vec![
            Cell::new(&row.column),
            Cell::new(kind),
            Cell::new(&row.fill_value),
            Cell::new(row.mean.map_or_else(String::new, |m| format!("{:.4}", m))),
            Cell::new(row.scale.map_or_else(String::new, |s| format!("{:.4}", s))),
            Cell::new(row.categories.join(", ")),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
