//! Report formatting and output generation
//!
//! Provides formatting for built reports via the [`ReportFormatter`] facade.
//! Supports Console, JSON, CSV and Plotly output formats.

pub mod promoted;
pub mod schedule;
pub mod site;
pub mod utils;

use crate::analysis::{PromoteScheduleReport, PromotedTrafficReport, Report, SiteTrafficReport};
use crate::errors::AppResult;
use std::fmt;
use std::str::FromStr;

/// Output format options for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    /// Table rows without header, numbers unlocalized
    Csv,
    Plotly,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "plotly" => Ok(OutputFormat::Plotly),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Plotly => "plotly",
        };
        f.write_str(name)
    }
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_report(report: &Report, f: &OutputFormat) -> AppResult<String> {
        match report {
            Report::PromotedItem(r) => Self::format_promoted_traffic(r, f),
            Report::Site(r) => Self::format_site_traffic(r, f),
            Report::PromotionSchedule(r) => Self::format_promote_schedule(r, f),
        }
    }

    pub fn format_promoted_traffic(r: &PromotedTrafficReport, f: &OutputFormat) -> AppResult<String> {
        promoted::format_promoted_traffic(r, f)
    }

    pub fn format_site_traffic(r: &SiteTrafficReport, f: &OutputFormat) -> AppResult<String> {
        site::format_site_traffic(r, f)
    }

    pub fn format_promote_schedule(r: &PromoteScheduleReport, f: &OutputFormat) -> AppResult<String> {
        schedule::format_promote_schedule(r, f)
    }
}
