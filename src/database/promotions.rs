//! Promotion schedule, item and bid ledger queries.

use crate::database::helpers::{format_date, parse_date, parse_timestamp};
use crate::database::traits::PromotionStore;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::types::{BidHistoryPoint, PromotedItem, PromoterTotal, PromotionRecord};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

impl PromotionStore for Database {
    fn promotions_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<PromotionRecord>> {
        let mut stmt = self.connection().prepare_cached(
            r#"SELECT item_id, start_date, end_date
               FROM promotion_dates
               WHERE start_date < ?2 AND end_date > ?1
               ORDER BY start_date, id"#,
        )?;

        let rows = stmt.query_map(params![format_date(start), format_date(end)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (item_id, start_date, end_date) = row?;
            records.push(PromotionRecord {
                item_id,
                start_date: parse_date(&start_date)?,
                end_date: parse_date(&end_date)?,
            });
        }
        Ok(records)
    }

    fn promoted_item(&self, item_id: &str) -> AppResult<Option<PromotedItem>> {
        let raw = self
            .connection()
            .query_row(
                r#"SELECT item_id, owner_id, title, bid_cents, status, promoted,
                          created_at, promote_until, score
                   FROM promoted_items WHERE item_id = ?1"#,
                params![item_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, bool>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, String>(7)?,
                        row.get::<_, i64>(8)?,
                    ))
                },
            )
            .optional()?;

        let Some((item_id, owner_id, title, bid_cents, status, promoted, created, until, score)) =
            raw
        else {
            return Ok(None);
        };

        Ok(Some(PromotedItem {
            item_id,
            owner_id,
            title,
            bid_cents,
            status: status.parse().map_err(AppError::InvalidData)?,
            promoted,
            created_at: parse_timestamp(&created)?,
            promote_until: parse_timestamp(&until)?,
            score,
        }))
    }

    fn bid_history(&self, since: NaiveDate) -> AppResult<Vec<BidHistoryPoint>> {
        let mut stmt = self.connection().prepare_cached(
            r#"SELECT date, SUM(bid_cents), SUM(refund_cents)
               FROM bid_ledger
               WHERE date >= ?1
               GROUP BY date
               ORDER BY date"#,
        )?;

        let rows = stmt.query_map(params![format_date(since)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut history = Vec::new();
        for row in rows {
            let (date, bid_cents, refund_cents) = row?;
            history.push(BidHistoryPoint {
                date: parse_date(&date)?,
                bid_cents,
                refund_cents,
            });
        }
        Ok(history)
    }

    fn top_promoters(&self, since: NaiveDate, limit: usize) -> AppResult<Vec<PromoterTotal>> {
        let mut stmt = self.connection().prepare_cached(
            r#"SELECT owner_id, SUM(bid_cents + refund_cents) AS total, COUNT(*)
               FROM bid_ledger
               WHERE date >= ?1
               GROUP BY owner_id
               ORDER BY total DESC, owner_id
               LIMIT ?2"#,
        )?;

        let rows = stmt.query_map(params![format_date(since), limit as i64], |row| {
            Ok(PromoterTotal {
                owner_id: row.get(0)?,
                total_cents: row.get(1)?,
                ledger_days: row.get::<_, i64>(2)? as u32,
            })
        })?;

        let promoters = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(promoters)
    }

    fn community_exists(&self, name: &str) -> AppResult<bool> {
        let found: Option<i64> = self
            .connection()
            .query_row(
                "SELECT 1 FROM communities WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}
