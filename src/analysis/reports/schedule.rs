//! Promotion schedule report formatter

use super::utils::{export_json, export_plotly, format_number, render_table};
use super::OutputFormat;
use crate::analysis::PromoteScheduleReport;
use crate::errors::AppResult;
use crate::utils::currency::{cents_to_dollars, format_cents};
use chrono::Duration;

/// Format the promotion schedule
///
/// Console output shows per-day market occupancy, the packed layout chains,
/// money totals, top promoters and the recent traffic table.
pub fn format_promote_schedule(
    report: &PromoteScheduleReport,
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Csv => report.to_csv(),
        OutputFormat::Plotly => export_plotly(&report.charts()),
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str("\n📅 Promotion Schedule\n");
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
            output.push_str(&format!(
                "Window: {} to {} ({} days)\n\n",
                report.window.start_date,
                report.window.end_date(),
                report.window.size_days
            ));

            output.push_str(&format!(
                "  {:<12} {:>12} {:>12} {:>8}\n",
                "Date", "Market", "Mine", "Promos"
            ));
            output.push_str(&format!("  {:-<12} {:->12} {:->12} {:->8}\n", "", "", "", ""));
            for offset in 0..report.window.size_days {
                let date = report.window.start_date + Duration::days(offset);
                let marker = if date == report.today { " *" } else { "" };
                output.push_str(&format!(
                    "  {:<12} {:>12} {:>12} {:>8}{}\n",
                    date.to_string(),
                    format_cents(report.market.market_at(offset)),
                    format_cents(report.market.my_market_at(offset)),
                    report.market.count_at(offset),
                    marker
                ));
            }
            output.push('\n');

            if !report.blocks.is_empty() {
                output.push_str("Your promotions:\n");
                for (i, chain) in report.blocks.iter().enumerate() {
                    let placed: Vec<String> = chain
                        .iter()
                        .map(|b| format!("{} [{}..{})", b.item, b.start, b.end))
                        .collect();
                    output.push_str(&format!("  track {}: {}\n", i + 1, placed.join(", ")));
                }
                output.push('\n');
            }

            if !report.bid_history.is_empty() {
                output.push_str(&format!(
                    "Sales: ${:.2} total, ${:.2} credits over {} days\n",
                    cents_to_dollars(report.total_sales_cents),
                    cents_to_dollars(report.total_refunds_cents),
                    report.bid_history.len()
                ));
                for promoter in &report.top_promoters {
                    output.push_str(&format!(
                        "  {:<24} {:>12} {:>6} days\n",
                        promoter.owner_id,
                        format_cents(promoter.total_cents),
                        promoter.ledger_days
                    ));
                }
                output.push('\n');
            }

            if !report.economics.is_empty() {
                output.push_str(&format!(
                    "Averages: CTR {:.2}%, CPC ${:.2}, CPM ${:.2} over {} days\n\n",
                    report.economics.mean_ctr,
                    report.economics.mean_cpc / 100.0,
                    report.economics.mean_cpm,
                    format_number(report.economics.points.len() as i64)
                ));
            }

            if report.recent.is_empty() {
                output.push_str("No recent promoted item traffic.\n");
            } else {
                output.push_str("Recent promoted item traffic:\n");
                output.push_str(&render_table(&report.table()?));
            }

            Ok(output)
        }
    }
}
