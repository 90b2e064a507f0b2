//! Output format and CLI smoke tests
//!
//! Renders every report kind in every output format, checks the CSV export
//! re-splits into the table's rows, and drives the CLI commands against an
//! on-disk store.

use crate::common::csv_fixtures::{import_fixtures, write_fixtures};
use crate::common::database::TestDatabase;
use crate::common::fixtures::at;
use clap::Parser;
use promo_traffic::analysis::{
    OutputFormat, Report, ReportAssembler, ReportFormatter, ReportKind, SiteScope,
};
use promo_traffic::cli::{Cli, Commands};
use promo_traffic::config::ReportingConfig;
use promo_traffic::database::{Database, PromotionStore};
use promo_traffic::types::Viewer;

fn all_reports() -> anyhow::Result<(TestDatabase, Vec<Report>)> {
    let test_db = TestDatabase::new("formats")?;
    let dir = tempfile::tempdir()?;
    import_fixtures(test_db.path(), dir.path())?;

    let assembler = ReportAssembler::open(test_db.path(), ReportingConfig::default())?;
    let viewer = Viewer::new("u", false);
    let now = at(2024, 6, 8, 12);
    let reports = [
        ReportKind::PromotedItem("t3_a".to_string()),
        ReportKind::Site(SiteScope::Sitewide),
        ReportKind::Site(SiteScope::Community {
            name: "pics".to_string(),
            is_domain: false,
        }),
        ReportKind::PromotionSchedule,
    ]
    .iter()
    .map(|kind| assembler.build_report(kind, &viewer, now))
    .collect::<Result<Vec<_>, _>>()?;
    Ok((test_db, reports))
}

#[test]
fn test_csv_export_resplits_into_table_rows() -> anyhow::Result<()> {
    let (_db, reports) = all_reports()?;
    for report in &reports {
        let table = report.table()?;
        let csv_text = ReportFormatter::format_report(report, &OutputFormat::Csv)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv_text.as_bytes());
        let parsed: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect()))
            .collect::<Result<_, _>>()?;

        assert_eq!(parsed, table.records(false));
        assert!(parsed.iter().all(|row| row.len() == table.columns.len()));
    }
    Ok(())
}

#[test]
fn test_json_output_is_tagged() -> anyhow::Result<()> {
    let (_db, reports) = all_reports()?;
    let kinds: Vec<String> = reports
        .iter()
        .map(|r| -> anyhow::Result<String> {
            let json = ReportFormatter::format_report(r, &OutputFormat::Json)?;
            let value: serde_json::Value = serde_json::from_str(&json)?;
            Ok(value["kind"].as_str().unwrap_or_default().to_string())
        })
        .collect::<anyhow::Result<_>>()?;
    assert_eq!(kinds, vec!["promoted_item", "site", "site", "promotion_schedule"]);
    Ok(())
}

#[test]
fn test_plotly_output_has_one_chart_per_series() -> anyhow::Result<()> {
    let (_db, reports) = all_reports()?;
    for report in &reports {
        let json = ReportFormatter::format_report(report, &OutputFormat::Plotly)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        let charts = value.as_array().expect("plotly output is an array");
        assert_eq!(charts.len(), report.charts().len());
        for (chart, series) in charts.iter().zip(report.charts()) {
            assert_eq!(chart["layout"]["title"]["text"], series.title.as_str());
            assert_eq!(chart["data"].as_array().map(Vec::len), Some(series.y.len()));
        }
    }
    Ok(())
}

#[test]
fn test_console_output_sections() -> anyhow::Result<()> {
    let (_db, reports) = all_reports()?;
    let console: Vec<String> = reports
        .iter()
        .map(|r| ReportFormatter::format_report(r, &OutputFormat::Console))
        .collect::<Result<_, _>>()?;

    assert!(console[0].contains("Promotion Traffic: Alpha launch"));
    assert!(console[0].contains("Preliminary"));
    assert!(console[0].contains("Totals: 800 impressions, 16 clicks"));

    assert!(console[1].contains("Traffic: sitewide"));
    assert!(console[1].contains("103,427"));
    assert!(console[1].contains("frontpage"));

    assert!(console[2].contains("Daily traffic:"));

    assert!(console[3].contains("track 1: t3_a [2..9)"));
    assert!(console[3].contains("Sales: $145.00 total, $20.00 credits"));
    assert!(console[3].contains("Beta, now with commas"));
    Ok(())
}

#[test]
fn test_cli_import_and_report_to_file() -> anyhow::Result<()> {
    let test_db = TestDatabase::new("cli_smoke")?;
    let dir = tempfile::tempdir()?;
    let files = write_fixtures(dir.path())?;

    for (kind, path) in &files {
        let csv_path = path.to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "promo-traffic",
            "import",
            kind.as_str(),
            csv_path.as_str(),
            "--database-path",
            test_db.path(),
        ])?;
        let Commands::Import(command) = cli.command else {
            panic!("expected the import command");
        };
        command.run()?;
    }
    assert!(Database::new(test_db.path())?.promoted_item("t3_a")?.is_some());

    let out = dir.path().join("out").join("schedule.csv");
    let out_path = out.to_string_lossy().to_string();
    let cli = Cli::try_parse_from([
        "promo-traffic",
        "report",
        "schedule",
        "--database-path",
        test_db.path(),
        "--viewer",
        "u",
        "--now",
        "2024-06-08 12:00:00",
        "--format",
        "csv",
        "--output",
        out_path.as_str(),
    ])?;
    let Commands::Report(command) = cli.command else {
        panic!("expected the report command");
    };
    command.run()?;

    let written = std::fs::read_to_string(&out)?;
    assert!(written.starts_with("2024-06-02,340,800,8,16,12,$70.00,Alpha launch\n"));
    Ok(())
}

#[test]
fn test_cli_rejects_bad_arguments() {
    assert!(Cli::try_parse_from(["promo-traffic", "report", "site", "--domain"]).is_err());
    assert!(Cli::try_parse_from(["promo-traffic", "import", "weather", "x.csv"]).is_err());
    assert!(Cli::try_parse_from(["promo-traffic", "report", "promoted"]).is_err());
    assert!(Cli::try_parse_from([
        "promo-traffic",
        "report",
        "site",
        "--community",
        "pics",
        "--domain",
    ])
    .is_ok());
}
