//! Site and community traffic report formatter

use super::utils::{export_json, export_plotly, format_number, render_table};
use super::OutputFormat;
use crate::analysis::site_traffic::ListingKind;
use crate::analysis::{SiteScope, SiteTrafficReport};
use crate::errors::AppResult;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Format a site-wide or community traffic report
///
/// Displays:
/// - Overall daily means
/// - Day-of-week means
/// - Monthly summary (site-wide) or daily rows (community)
/// - Top communities by impressions (site-wide)
pub fn format_site_traffic(report: &SiteTrafficReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Csv => report.to_csv(),
        OutputFormat::Plotly => export_plotly(&report.charts()),
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str(&format!("\n📊 Traffic: {}\n", report.scope.label()));
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            if !report.has_data {
                output.push_str("No traffic data available.\n");
            } else {
                output.push_str(&format!(
                    "Daily means: {} uniques, {} impressions\n\n",
                    format_number(report.uniques_mean.round() as i64),
                    format_number(report.impressions_mean.round() as i64)
                ));

                output.push_str("By day of week:\n");
                output.push_str(&format!("  {:<5} {:>12} {:>14}\n", "Day", "Uniques", "Impressions"));
                output.push_str(&format!("  {:-<5} {:->12} {:->14}\n", "", "", ""));
                for (dow, name) in WEEKDAYS.iter().enumerate() {
                    output.push_str(&format!(
                        "  {:<5} {:>12} {:>14}\n",
                        name,
                        format_number(report.day_of_week.uniques[dow].round() as i64),
                        format_number(report.day_of_week.impressions[dow].round() as i64)
                    ));
                }
                output.push('\n');

                let heading = if report.scope == SiteScope::Sitewide {
                    "Monthly summary (gray = projected):\n"
                } else {
                    "Daily traffic:\n"
                };
                output.push_str(heading);
                output.push_str(&render_table(&report.table()?));
                output.push('\n');
            }

            if !report.leaderboard.is_empty() {
                output.push_str("Communities by impressions:\n");
                for entry in &report.leaderboard {
                    let kind = match entry.kind {
                        ListingKind::Special => "listing",
                        ListingKind::Community => "community",
                        ListingKind::Domain => "domain",
                    };
                    output.push_str(&format!(
                        "  {:<24} {:<10} {:>14}\n",
                        entry.name,
                        kind,
                        format_number(entry.traffic.total_impressions as i64)
                    ));
                }
            }

            Ok(output)
        }
    }
}
