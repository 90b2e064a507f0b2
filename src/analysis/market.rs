//! Ad-market occupancy across a schedule window
//!
//! Spreads each campaign's bid evenly over its days and sums the daily shares
//! per window offset. Summation is commutative, so the result does not depend
//! on the order intervals arrive in.

use crate::types::{MarketOccupancy, PromotionInterval, ReportWindow, Viewer};

/// Per-offset accumulation of promotion demand
pub struct IntervalAccumulator;

impl IntervalAccumulator {
    /// Accumulate `intervals` over `window`
    ///
    /// Every covered offset gets the interval's daily bid added to `market`
    /// and its campaign counted. `my_market` only receives intervals the
    /// viewer owns, or all of them for a sponsor.
    pub fn accumulate(
        intervals: &[PromotionInterval],
        window: &ReportWindow,
        viewer: &Viewer,
    ) -> MarketOccupancy {
        let mut occupancy = MarketOccupancy::default();

        for interval in intervals {
            let Some((starti, endi)) = window.clip(interval.start_date, interval.end_date) else {
                continue;
            };
            let daily_bid = interval.daily_bid();
            let visible = viewer.can_see(&interval.owner_id);

            for offset in starti..endi {
                *occupancy.market.entry(offset).or_insert(0) += daily_bid;
                if visible {
                    *occupancy.my_market.entry(offset).or_insert(0) += daily_bid;
                }
                *occupancy.count.entry(offset).or_insert(0) += 1;
            }
        }

        occupancy
    }
}
