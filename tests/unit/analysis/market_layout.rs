//! Unit tests for market accumulation and layout packing
//!
//! The worked fourteen-day example plus structural properties checked over
//! generated interval sets: additivity, order independence and chain validity.

use crate::common::database::TestDatabase;
use crate::common::fixtures::{at, date, item, promotion};
use chrono::{Duration, NaiveDate};
use promo_traffic::analysis::{ContiguousBlockPacker, IntervalAccumulator, PromoteScheduleAnalyser};
use promo_traffic::config::ReportingConfig;
use promo_traffic::database::ImportOperations;
use promo_traffic::types::{LayoutBlock, MarketOccupancy, PromotionInterval, ReportWindow, Viewer};

/// Small deterministic generator so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: i64) -> i64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % bound as u64) as i64
    }
}

fn day0() -> NaiveDate {
    date(2024, 6, 1)
}

fn generated_intervals(seed: u64, n: usize) -> Vec<PromotionInterval> {
    let mut rng = Lcg(seed);
    (0..n)
        .map(|i| {
            let start = rng.next(20) - 3;
            let len = rng.next(8) + 1;
            PromotionInterval {
                item_id: format!("t3_{}", i),
                start_date: day0() + Duration::days(start),
                end_date: day0() + Duration::days(start + len),
                bid_cents: 100 * (rng.next(50) + 1),
                owner_id: if i % 3 == 0 { "alice" } else { "bob" }.to_string(),
            }
        })
        .collect()
}

fn window() -> ReportWindow {
    ReportWindow::new(day0(), day0() + Duration::days(14))
}

#[test]
fn test_fourteen_day_example_through_store() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("schedule_example")?;
    let created = at(2024, 5, 30, 12);
    test_db.database_mut().upsert_promoted_items(&[
        item("t3_a", "u", 7000, created, at(2024, 6, 10, 0)),
        item("t3_b", "v", 6000, created, at(2024, 6, 12, 0)),
    ])?;
    test_db.database_mut().insert_promotion_records(&[
        promotion("t3_a", date(2024, 6, 3), date(2024, 6, 10)),
        promotion("t3_b", date(2024, 6, 6), date(2024, 6, 12)),
    ])?;

    let report = PromoteScheduleAnalyser::analyse(
        test_db.database(),
        &Viewer::new("u", false),
        at(2024, 6, 8, 12),
        &ReportingConfig::default(),
    )?;

    assert_eq!(report.window.start_date, day0());
    assert_eq!(report.window.size_days, 14);
    assert_eq!(report.market.market_at(6), 2000);
    assert_eq!(report.market.my_market_at(6), 1000);
    assert_eq!(report.market.count_at(6), 2);
    assert_eq!(report.market.market_at(3), 1000);
    assert_eq!(report.market.my_market_at(3), 1000);
    assert_eq!(report.market.count_at(3), 1);

    // Only the viewer's own campaign is laid out
    assert_eq!(report.blocks.len(), 1);
    assert_eq!(report.blocks[0], vec![LayoutBlock::new("t3_a".to_string(), 2, 9)]);
    Ok(())
}

#[test]
fn test_market_is_additive_over_disjoint_sets() {
    let viewer = Viewer::new("alice", false);
    for seed in 1..20 {
        let intervals = generated_intervals(seed, 12);
        let (left, right) = intervals.split_at(5);

        let whole = IntervalAccumulator::accumulate(&intervals, &window(), &viewer);
        let a = IntervalAccumulator::accumulate(left, &window(), &viewer);
        let b = IntervalAccumulator::accumulate(right, &window(), &viewer);

        for offset in 0..14 {
            assert_eq!(whole.market_at(offset), a.market_at(offset) + b.market_at(offset));
            assert_eq!(
                whole.my_market_at(offset),
                a.my_market_at(offset) + b.my_market_at(offset)
            );
            assert_eq!(whole.count_at(offset), a.count_at(offset) + b.count_at(offset));
            assert!(whole.my_market_at(offset) <= whole.market_at(offset));
        }
        assert!(whole.market.keys().all(|o| (0..14).contains(o)));
    }
}

#[test]
fn test_market_ignores_input_order() {
    let sponsor = Viewer::new("nobody", true);
    let intervals = generated_intervals(42, 15);
    let mut reversed = intervals.clone();
    reversed.reverse();

    let forward: MarketOccupancy = IntervalAccumulator::accumulate(&intervals, &window(), &sponsor);
    let backward = IntervalAccumulator::accumulate(&reversed, &window(), &sponsor);
    assert_eq!(forward, backward);
    assert_eq!(forward.market, forward.my_market);
}

#[test]
fn test_packed_chains_are_valid_and_deterministic() {
    for seed in 1..30 {
        let mut rng = Lcg(seed);
        let blocks: Vec<LayoutBlock<usize>> = (0..10)
            .map(|i| {
                let start = rng.next(14);
                LayoutBlock::new(i, start, start + rng.next(5) + 1)
            })
            .collect();

        let chains = ContiguousBlockPacker::pack(blocks.clone());
        assert_eq!(chains, ContiguousBlockPacker::pack(blocks.clone()));

        let mut placed: Vec<usize> = chains.iter().flatten().map(|b| b.item).collect();
        placed.sort_unstable();
        assert_eq!(placed, (0..10).collect::<Vec<_>>());

        for chain in &chains {
            for pair in chain.windows(2) {
                assert!(pair[1].start >= pair[0].end, "overlap in chain {:?}", chain);
            }
        }
    }
}

#[test]
fn test_packer_tie_prefers_earliest_start_then_longest() {
    let chains = ContiguousBlockPacker::pack(vec![
        LayoutBlock::new("seed", 0, 2),
        LayoutBlock::new("late", 4, 10),
        LayoutBlock::new("short", 2, 3),
        LayoutBlock::new("long", 2, 6),
    ]);
    let ids: Vec<Vec<&str>> = chains
        .iter()
        .map(|c| c.iter().map(|b| b.item).collect())
        .collect();
    assert_eq!(ids, vec![vec!["seed", "long"], vec!["late"], vec!["short"]]);
}
