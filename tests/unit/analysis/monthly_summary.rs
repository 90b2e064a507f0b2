//! Unit tests for the site-wide monthly summary
//!
//! Seeds hour/day/month series for the site and checks the month-over-month
//! deltas and the projection of the current month.

use crate::common::database::TestDatabase;
use crate::common::db_seeding::{seed_daily, seed_series};
use crate::common::fixtures::{at, date};
use chrono::NaiveDate;
use promo_traffic::analysis::{SiteScope, SiteTrafficAnalyser};
use promo_traffic::types::{CellClass, CellValue, Resolution, TrafficSample, TrafficScope};

fn seed_site(
    test_db: &mut TestDatabase,
    months: &[((i32, u32), u64, u64)],
    days: &[(NaiveDate, i64, u64)],
) -> anyhow::Result<()> {
    seed_series(
        test_db,
        TrafficScope::Total,
        Resolution::Hour,
        &[(at(2024, 1, 1, 0), TrafficSample::new(1, 1, 0, 0))],
    )?;
    let month_points: Vec<_> = months
        .iter()
        .map(|((y, m), uniques, total)| (at(*y, *m, 1, 0), TrafficSample::new(*uniques, *total, 0, 0)))
        .collect();
    seed_series(test_db, TrafficScope::Total, Resolution::Month, &month_points)?;
    for (start, count, uniques) in days {
        let uniques = *uniques;
        seed_daily(test_db, TrafficScope::Total, *start, *count, |_| {
            TrafficSample::new(uniques, 1000, 0, 0)
        })?;
    }
    Ok(())
}

#[test]
fn test_current_month_projected_from_daily_means() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("monthly_projection")?;
    seed_site(
        &mut test_db,
        &[((2024, 1), 2000, 20000), ((2024, 2), 2500, 29000), ((2024, 3), 1200, 10000)],
        &[(date(2024, 2, 1), 29, 100), (date(2024, 3, 1), 10, 150)],
    )?;

    let report =
        SiteTrafficAnalyser::analyse(test_db.database(), SiteScope::Sitewide, date(2024, 3, 11))?;
    assert!(report.has_data);

    let table = report.table()?;
    assert_eq!(table.rows.len(), 3);
    assert_eq!(
        report.to_csv()?,
        "2024-01,2000,20000,,\n2024-02,2500,29000,25.00%,45.00%\n2024-03,1200,10000,4008,31000\n"
    );

    let march = &table.rows[2];
    assert_eq!(march.cells[2].class, Some(CellClass::Gray));
    assert_eq!(march.cells[3].class, Some(CellClass::Gray));
    assert_eq!(table.rows[1].cells[2].class, Some(CellClass::Up));
    Ok(())
}

#[test]
fn test_finished_month_gets_deltas_not_projection() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("monthly_stale")?;
    seed_site(
        &mut test_db,
        &[((2024, 2), 2500, 29000), ((2024, 3), 1200, 10000)],
        &[(date(2024, 3, 1), 31, 150)],
    )?;

    let report =
        SiteTrafficAnalyser::analyse(test_db.database(), SiteScope::Sitewide, date(2024, 4, 5))?;
    let table = report.table()?;
    let march = table.rows[1].render(false);
    assert_eq!(march, vec!["2024-03", "1200", "10000", "-52.00%", "-65.52%"]);
    assert_eq!(table.rows[1].cells[2].class, Some(CellClass::Down));
    Ok(())
}

#[test]
fn test_january_projects_against_previous_december() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("monthly_january")?;
    seed_site(
        &mut test_db,
        &[((2023, 12), 310, 3100), ((2024, 1), 40, 400)],
        &[(date(2023, 12, 1), 31, 10), (date(2024, 1, 1), 2, 20)],
    )?;

    let report =
        SiteTrafficAnalyser::analyse(test_db.database(), SiteScope::Sitewide, date(2024, 1, 3))?;
    let table = report.table()?;
    assert_eq!(table.rows[1].render(false), vec!["2024-01", "40", "400", "620", "6200"]);
    Ok(())
}

#[test]
fn test_zero_previous_month_renders_placeholder() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("monthly_zero")?;
    seed_site(
        &mut test_db,
        &[((2024, 1), 0, 0), ((2024, 2), 500, 900)],
        &[(date(2024, 2, 1), 29, 10)],
    )?;

    let report =
        SiteTrafficAnalyser::analyse(test_db.database(), SiteScope::Sitewide, date(2024, 6, 1))?;
    let table = report.table()?;
    assert_eq!(table.rows[1].cells[2].value, CellValue::Missing);
    assert_eq!(table.rows[1].render(false)[3], "--.--%");
    Ok(())
}

#[test]
fn test_missing_resolution_means_no_data() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("monthly_partial")?;
    seed_daily(&mut test_db, TrafficScope::Total, date(2024, 2, 1), 3, |i| {
        TrafficSample::new(10 + i as u64, 100, 0, 0)
    })?;

    let report =
        SiteTrafficAnalyser::analyse(test_db.database(), SiteScope::Sitewide, date(2024, 2, 10))?;
    assert!(!report.has_data);
    assert!(report.monthly.is_none());
    assert!(report.table()?.is_empty());
    Ok(())
}
