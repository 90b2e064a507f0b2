use super::{get_db_path_from_config, load_config, write_output_to_file};
use crate::analysis::{OutputFormat, ReportAssembler, ReportFormatter, ReportKind, SiteScope};
use crate::errors::{AppError, AppResult};
use crate::types::Viewer;
use crate::utils::time::parse_datetime;
use chrono::{NaiveDateTime, Utc};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Build and render a traffic or schedule report
#[derive(Args)]
pub struct ReportCommand {
    #[command(subcommand)]
    pub report_type: ReportCommands,

    /// Database path (overrides config.toml and env vars)
    #[arg(long, global = true)]
    database_path: Option<PathBuf>,

    /// Output format (console, json, csv or plotly)
    #[arg(long, global = true, default_value = "console")]
    format: String,

    /// Account the report is built for
    #[arg(long, global = true, default_value = "anonymous")]
    viewer: String,

    /// Build the report with sponsor visibility
    #[arg(long, global = true)]
    sponsor: bool,

    /// Evaluate as of this UTC time instead of the current clock
    #[arg(long, global = true)]
    now: Option<String>,

    /// Write the rendered report to this file
    #[arg(long, global = true)]
    output: Option<PathBuf>,
}

/// Report types
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Hourly traffic over one promoted item's campaign
    Promoted {
        /// Item identifier, e.g. t3_abc
        item_id: String,
    },

    /// Site-wide traffic, or one community's with --community
    Site {
        /// Community (or domain listing) name
        #[arg(long)]
        community: Option<String>,

        /// Treat the community as a domain listing
        #[arg(long, requires = "community")]
        domain: bool,
    },

    /// Promotion market, layout and recent campaign traffic
    Schedule,
}

impl ReportCommands {
    fn kind(&self) -> ReportKind {
        match self {
            ReportCommands::Promoted { item_id } => ReportKind::PromotedItem(item_id.clone()),
            ReportCommands::Site { community, domain } => ReportKind::Site(match community {
                Some(name) => SiteScope::Community {
                    name: name.clone(),
                    is_domain: *domain,
                },
                None => SiteScope::Sitewide,
            }),
            ReportCommands::Schedule => ReportKind::PromotionSchedule,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ReportCommands::Promoted { .. } => "Promoted item report",
            ReportCommands::Site { .. } => "Traffic report",
            ReportCommands::Schedule => "Promotion schedule",
        }
    }
}

impl ReportCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = load_config();
        let db_path = get_db_path_from_config(&self.database_path, &app_config)?;
        let format: OutputFormat = self.format.parse().map_err(AppError::InvalidData)?;
        let now = self.resolve_now()?;
        let viewer = Viewer::new(&self.viewer, self.sponsor);

        let assembler = ReportAssembler::open(&db_path, app_config.reporting)?;
        let report = assembler.build_report(&self.report_type.kind(), &viewer, now)?;
        let rendered = ReportFormatter::format_report(&report, &format)?;

        match &self.output {
            Some(path) => write_output_to_file(path, &rendered, self.report_type.description())?,
            None => print!("{}", rendered),
        }
        Ok(())
    }

    fn resolve_now(&self) -> AppResult<NaiveDateTime> {
        match &self.now {
            Some(raw) => Ok(parse_datetime(raw)?),
            None => Ok(Utc::now().naive_utc()),
        }
    }
}
