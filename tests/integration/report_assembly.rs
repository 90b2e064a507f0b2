//! End-to-end report assembly over an imported store
//!
//! Builds each report kind through `ReportAssembler` from the CSV fixtures,
//! evaluated at 2024-06-08 12:00 UTC.

use crate::common::csv_fixtures::import_fixtures;
use crate::common::database::TestDatabase;
use crate::common::fixtures::at;
use promo_traffic::analysis::site_traffic::ListingKind;
use promo_traffic::analysis::{Report, ReportAssembler, ReportKind, SiteScope};
use promo_traffic::config::ReportingConfig;
use promo_traffic::database::Database;
use promo_traffic::errors::AppError;
use promo_traffic::types::{LayoutBlock, TrafficSample, Viewer};

fn assembler(test_name: &str) -> anyhow::Result<(TestDatabase, ReportAssembler<Database>)> {
    let test_db = TestDatabase::new(test_name)?;
    let dir = tempfile::tempdir()?;
    import_fixtures(test_db.path(), dir.path())?;
    let assembler = ReportAssembler::open(test_db.path(), ReportingConfig::default())?;
    Ok((test_db, assembler))
}

fn owner_u() -> Viewer {
    Viewer::new("u", false)
}

#[test]
fn test_promoted_item_report() -> anyhow::Result<()> {
    let (_db, assembler) = assembler("assembly_promoted")?;
    let report = assembler.build_report(
        &ReportKind::PromotedItem("t3_a".to_string()),
        &owner_u(),
        at(2024, 6, 8, 12),
    )?;

    let Report::PromotedItem(promoted) = report else {
        panic!("expected a promoted item report");
    };
    assert_eq!(promoted.window_start, at(2024, 6, 2, 10));
    assert_eq!(promoted.hourly.len(), 3);
    assert_eq!(promoted.totals, TrafficSample::new(240, 800, 7, 16));
    assert!(promoted.preliminary);
    assert!(promoted.viewer_can_edit);
    assert_eq!(promoted.table()?.rows.len(), 4);
    Ok(())
}

#[test]
fn test_unknown_item_is_not_found() -> anyhow::Result<()> {
    let (_db, assembler) = assembler("assembly_unknown")?;
    let result = assembler.build_report(
        &ReportKind::PromotedItem("t3_zzz".to_string()),
        &owner_u(),
        at(2024, 6, 8, 12),
    );
    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}

#[test]
fn test_sitewide_report() -> anyhow::Result<()> {
    let (_db, assembler) = assembler("assembly_sitewide")?;
    let report = assembler.build_report(
        &ReportKind::Site(SiteScope::Sitewide),
        &owner_u(),
        at(2024, 6, 8, 12),
    )?;

    let Report::Site(site) = &report else {
        panic!("expected a site report");
    };
    assert!(site.has_data);
    assert_eq!(site.uniques_mean, 4500.0);
    assert_eq!(
        report.to_csv()?,
        "2024-05,90000,250000,,\n2024-06,9500,20500,103427,87857\n"
    );

    let board: Vec<(&str, ListingKind)> = site
        .leaderboard
        .iter()
        .map(|e| (e.name.as_str(), e.kind))
        .collect();
    assert_eq!(
        board,
        vec![
            ("frontpage", ListingKind::Special),
            ("pics", ListingKind::Community),
            ("example.com", ListingKind::Domain),
        ]
    );
    assert_eq!(report.charts().len(), 6);
    Ok(())
}

#[test]
fn test_community_and_domain_reports() -> anyhow::Result<()> {
    let (_db, assembler) = assembler("assembly_community")?;
    let now = at(2024, 6, 8, 12);

    let pics = assembler.build_report(
        &ReportKind::Site(SiteScope::Community {
            name: "pics".to_string(),
            is_domain: false,
        }),
        &owner_u(),
        now,
    )?;
    assert_eq!(pics.to_csv()?, "2024-06-01,300,700,4\n2024-06-02,320,650,6\n");
    let titles: Vec<String> = pics.charts().into_iter().map(|c| c.title).collect();
    assert_eq!(
        titles,
        vec![
            "uniques by hour",
            "impressions by hour",
            "uniques by day",
            "impressions by day",
            "subscriptions by day",
        ]
    );

    let domain = assembler.build_report(
        &ReportKind::Site(SiteScope::Community {
            name: "example.com".to_string(),
            is_domain: true,
        }),
        &owner_u(),
        now,
    )?;
    let charts = domain.charts();
    assert_eq!(charts[2].title, "uniques by day");
    assert_eq!(charts[2].y, vec![vec![40.0], vec![12.0]]);

    let unknown = assembler.build_report(
        &ReportKind::Site(SiteScope::Community {
            name: "nothing".to_string(),
            is_domain: false,
        }),
        &owner_u(),
        now,
    )?;
    let Report::Site(unknown) = unknown else {
        panic!("expected a site report");
    };
    assert!(!unknown.has_data);
    assert!(unknown.charts().is_empty());
    Ok(())
}

#[test]
fn test_schedule_report_for_owner() -> anyhow::Result<()> {
    let (_db, assembler) = assembler("assembly_schedule")?;
    let report =
        assembler.build_report(&ReportKind::PromotionSchedule, &owner_u(), at(2024, 6, 8, 12))?;

    assert_eq!(
        report.to_csv()?,
        "2024-06-02,340,800,8,16,12,$70.00,Alpha launch\n\
         2024-06-05,50,80,0,1,3,$60.00,\"Beta, now with commas\"\n"
    );

    let Report::PromotionSchedule(schedule) = &report else {
        panic!("expected a schedule report");
    };
    // Rejected t3_c and stale t3_gone never reach the market
    assert_eq!(schedule.promotions.len(), 2);
    assert_eq!(schedule.market.market_at(6), 2000);
    assert_eq!(schedule.market.my_market_at(6), 1000);
    assert_eq!(schedule.market.count_at(0), 0);
    assert_eq!(
        schedule.blocks,
        vec![vec![LayoutBlock::new("t3_a".to_string(), 2, 9)]]
    );

    assert_eq!(schedule.total_sales_cents, 14500);
    assert_eq!(schedule.total_refunds_cents, 2000);
    let promoters: Vec<(&str, i64, u32)> = schedule
        .top_promoters
        .iter()
        .map(|p| (p.owner_id.as_str(), p.total_cents, p.ledger_days))
        .collect();
    assert_eq!(promoters, vec![("u", 10000, 2), ("v", 6500, 1)]);

    assert_eq!(schedule.economics.points.len(), 3);
    assert_eq!(schedule.economics.points[2].spend_cents, 3000);
    assert_eq!(schedule.economics.points[2].cpm, 30.0);
    assert_eq!(schedule.economics.points[2].cpc, 0.0);

    let charts = report.charts();
    assert_eq!(charts.len(), 6);
    assert_eq!(charts[0].title, "monthly sales ($145.00 total, $20.00 credits)");
    assert!(charts[0].stacked);
    Ok(())
}

#[test]
fn test_sponsor_sees_every_chain() -> anyhow::Result<()> {
    let (_db, assembler) = assembler("assembly_sponsor")?;
    let report = assembler.build_report(
        &ReportKind::PromotionSchedule,
        &Viewer::new("staff", true),
        at(2024, 6, 8, 12),
    )?;
    let Report::PromotionSchedule(schedule) = report else {
        panic!("expected a schedule report");
    };
    assert_eq!(schedule.market.my_market_at(6), schedule.market.market_at(6));
    assert_eq!(
        schedule.blocks,
        vec![
            vec![LayoutBlock::new("t3_a".to_string(), 2, 9)],
            vec![LayoutBlock::new("t3_b".to_string(), 5, 11)],
        ]
    );
    Ok(())
}

#[test]
fn test_empty_store_builds_empty_reports() -> anyhow::Result<()> {
    let test_db = TestDatabase::new("assembly_empty")?;
    let assembler = ReportAssembler::open(test_db.path(), ReportingConfig::default())?;
    let now = at(2024, 6, 8, 12);

    let schedule = assembler.build_report(&ReportKind::PromotionSchedule, &owner_u(), now)?;
    assert!(schedule.charts().is_empty());
    assert_eq!(schedule.to_csv()?, "");

    let site = assembler.build_report(&ReportKind::Site(SiteScope::Sitewide), &owner_u(), now)?;
    assert!(site.table()?.is_empty());
    Ok(())
}
