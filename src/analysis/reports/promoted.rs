//! Promoted item traffic report formatter

use super::utils::{export_json, export_plotly, format_number, render_table};
use super::OutputFormat;
use crate::analysis::PromotedTrafficReport;
use crate::errors::AppResult;
use crate::utils::currency::format_cents;

/// Format a promoted item's traffic report
///
/// Console output lists the hourly table with its reconciled total row.
pub fn format_promoted_traffic(
    report: &PromotedTrafficReport,
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Csv => report.to_csv(),
        OutputFormat::Plotly => export_plotly(&report.charts()),
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str(&format!("\n📊 Promotion Traffic: {}\n", report.item.title));
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            output.push_str(&format!("Item:   {}\n", report.item.item_id));
            output.push_str(&format!(
                "Window: {} to {}\n",
                report.window_start.format("%Y-%m-%d %H:%M"),
                report.window_end.format("%Y-%m-%d %H:%M")
            ));
            output.push_str(&format!("Bid:    {}\n", format_cents(report.item.bid_cents)));
            output.push_str(&format!(
                "Totals: {} impressions, {} clicks\n",
                format_number(report.totals.total_impressions as i64),
                format_number(report.totals.total_clicks as i64)
            ));
            if report.preliminary {
                output.push_str("\n⚠️  Preliminary: figures may change until a day after the promotion ends\n");
            }
            output.push('\n');

            if report.hourly.is_empty() {
                output.push_str("No hourly traffic recorded for this promotion window.\n");
                return Ok(output);
            }

            output.push_str(&render_table(&report.table()?));
            Ok(output)
        }
    }
}
