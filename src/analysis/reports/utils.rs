//! Utility functions for report formatting
//!
//! Shared helpers used across all report formatters.

use crate::errors::{AppError, AppResult};
use crate::types::{ChartSeries, PlotlyChart, Table};
use serde::Serialize;

pub use crate::utils::format::format_number;

/// Export data as JSON for programmatic use
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e)))
}

/// Plotly JSON array, one chart per series
pub fn export_plotly(charts: &[ChartSeries]) -> AppResult<String> {
    let plotly: Vec<PlotlyChart> = charts.iter().map(|c| c.to_plotly_chart()).collect();
    export_json(&plotly)
}

/// Render a table as aligned console text with localized numbers
///
/// The label column is left-aligned, every other column right-aligned.
pub fn render_table(table: &Table) -> String {
    let records = table.records(true);
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for record in &records {
        for (i, field) in record.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(field.chars().count());
            }
        }
    }

    let line = |fields: &[String]| -> String {
        let cells: Vec<String> = fields
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (field, &w))| {
                if i == 0 {
                    format!("{:<w$}", field, w = w)
                } else {
                    format!("{:>w$}", field, w = w)
                }
            })
            .collect();
        format!("  {}\n", cells.join("  ").trim_end())
    };

    let mut output = line(&table.columns);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    output.push_str(&line(&rule));
    for record in &records {
        output.push_str(&line(record));
    }
    output
}
