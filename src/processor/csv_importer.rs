//! CSV ingestion into the SQLite store
//!
//! Every input has a header row; lines starting with `#` are skipped. Records
//! are validated in full before anything is written, so a malformed line
//! leaves the store untouched. Writes commit one transaction per batch: a
//! database failure mid-import keeps the batches already committed. Money
//! columns are decimal dollars ("12.50").

use crate::database::{Database, ImportOperations};
use crate::errors::{AppError, AppResult};
use crate::types::{
    BidHistoryPoint, PromoteStatus, PromotedItem, PromotionRecord, Resolution, TimeBucket,
    TrafficSample, TrafficScope,
};
use crate::utils::currency::parse_dollars;
use crate::utils::time::{parse_date, parse_datetime};
use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub const DEFAULT_BATCH_SIZE: usize = 5_000;

/// Which table a CSV file feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// `resolution,scope,subject_key,bucket,unique_impressions,total_impressions,unique_clicks,total_clicks,subscriptions`
    Traffic,
    /// `item_id,owner_id,title,bid,status,promoted,created_at,promote_until,score`
    Items,
    /// `item_id,start_date,end_date`
    Promotions,
    /// `owner_id,date,bid,refund`
    Bids,
    /// `name`
    Communities,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Traffic => "traffic",
            ImportKind::Items => "items",
            ImportKind::Promotions => "promotions",
            ImportKind::Bids => "bids",
            ImportKind::Communities => "communities",
        }
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traffic" => Ok(ImportKind::Traffic),
            "items" => Ok(ImportKind::Items),
            "promotions" => Ok(ImportKind::Promotions),
            "bids" => Ok(ImportKind::Bids),
            "communities" => Ok(ImportKind::Communities),
            _ => Err(format!("Unknown import kind: {}", s)),
        }
    }
}

/// Outcome of one import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub records_read: usize,
    pub rows_written: usize,
    pub batches: usize,
}

#[derive(Debug, Deserialize)]
struct TrafficRow {
    resolution: String,
    scope: String,
    #[serde(default)]
    subject_key: String,
    bucket: String,
    unique_impressions: u64,
    total_impressions: u64,
    unique_clicks: u64,
    total_clicks: u64,
    subscriptions: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ItemRow {
    item_id: String,
    owner_id: String,
    title: String,
    bid: String,
    status: String,
    promoted: bool,
    created_at: String,
    promote_until: String,
    #[serde(default)]
    score: i64,
}

#[derive(Debug, Deserialize)]
struct PromotionRow {
    item_id: String,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
struct BidRow {
    owner_id: String,
    date: String,
    bid: String,
    #[serde(default)]
    refund: String,
}

#[derive(Debug, Deserialize)]
struct CommunityRow {
    name: String,
}

fn invalid(line: usize, reason: impl Into<String>) -> AppError {
    AppError::InvalidRecord {
        line,
        reason: reason.into(),
    }
}

fn money(line: usize, column: &str, value: &str) -> AppResult<i64> {
    if value.trim().is_empty() {
        return Ok(0);
    }
    parse_dollars(value).ok_or_else(|| invalid(line, format!("bad {} amount '{}'", column, value)))
}

impl TrafficRow {
    fn convert(self, line: usize) -> AppResult<(TrafficScope, TimeBucket, TrafficSample)> {
        let resolution: Resolution = self.resolution.parse().map_err(|e| invalid(line, e))?;
        let scope = TrafficScope::from_parts(&self.scope, &self.subject_key)
            .map_err(|e| invalid(line, e))?;
        let at = parse_datetime(&self.bucket)
            .map_err(|e| invalid(line, format!("bad bucket '{}': {}", self.bucket, e)))?;

        let mut sample = TrafficSample::new(
            self.unique_impressions,
            self.total_impressions,
            self.unique_clicks,
            self.total_clicks,
        );
        sample.subscriptions = self.subscriptions;
        Ok((scope, TimeBucket::new(resolution, at), sample))
    }
}

impl ItemRow {
    fn convert(self, line: usize) -> AppResult<PromotedItem> {
        let status: PromoteStatus = self.status.parse().map_err(|e| invalid(line, e))?;
        let created_at = parse_datetime(&self.created_at)
            .map_err(|e| invalid(line, format!("bad created_at: {}", e)))?;
        let promote_until = parse_datetime(&self.promote_until)
            .map_err(|e| invalid(line, format!("bad promote_until: {}", e)))?;

        Ok(PromotedItem {
            bid_cents: money(line, "bid", &self.bid)?,
            item_id: self.item_id,
            owner_id: self.owner_id,
            title: self.title,
            status,
            promoted: self.promoted,
            created_at,
            promote_until,
            score: self.score,
        })
    }
}

impl PromotionRow {
    fn convert(self, line: usize) -> AppResult<PromotionRecord> {
        let start_date = parse_date(&self.start_date)
            .map_err(|e| invalid(line, format!("bad start_date: {}", e)))?;
        let end_date =
            parse_date(&self.end_date).map_err(|e| invalid(line, format!("bad end_date: {}", e)))?;
        if end_date < start_date {
            return Err(invalid(line, "end_date before start_date"));
        }
        Ok(PromotionRecord {
            item_id: self.item_id,
            start_date,
            end_date,
        })
    }
}

impl BidRow {
    fn convert(self, line: usize) -> AppResult<(String, BidHistoryPoint)> {
        let date = parse_date(&self.date).map_err(|e| invalid(line, format!("bad date: {}", e)))?;
        let point = BidHistoryPoint {
            date,
            bid_cents: money(line, "bid", &self.bid)?,
            refund_cents: money(line, "refund", &self.refund)?,
        };
        Ok((self.owner_id, point))
    }
}

/// Loads CSV exports into a [`Database`]
pub struct CsvImporter {
    database: Database,
    batch_size: usize,
}

impl CsvImporter {
    pub fn new(database: Database, batch_size: usize) -> AppResult<Self> {
        if batch_size == 0 {
            return Err(AppError::Config(
                "Batch size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            database,
            batch_size,
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn import_file(&mut self, kind: ImportKind, path: &Path) -> AppResult<ImportStats> {
        info!("Importing {} from {}", kind.as_str(), path.display());
        let file = File::open(path)?;
        self.import_reader(kind, BufReader::new(file))
    }

    pub fn import_reader<R: Read>(&mut self, kind: ImportKind, reader: R) -> AppResult<ImportStats> {
        let stats = match kind {
            ImportKind::Traffic => {
                let rows = read_rows(reader, TrafficRow::convert)?;
                self.write_batches(&rows, |db, chunk| db.insert_traffic_batch(chunk))?
            }
            ImportKind::Items => {
                let rows = read_rows(reader, ItemRow::convert)?;
                self.write_batches(&rows, |db, chunk| db.upsert_promoted_items(chunk))?
            }
            ImportKind::Promotions => {
                let rows = read_rows(reader, PromotionRow::convert)?;
                self.write_batches(&rows, |db, chunk| db.insert_promotion_records(chunk))?
            }
            ImportKind::Bids => {
                let rows = read_rows(reader, BidRow::convert)?;
                self.write_batches(&rows, |db, chunk| db.insert_bid_history(chunk))?
            }
            ImportKind::Communities => {
                let rows = read_rows(reader, |row: CommunityRow, _| Ok(row.name))?;
                self.write_batches(&rows, |db, chunk| db.insert_communities(chunk))?
            }
        };

        info!(
            "Imported {}: {} records, {} rows written in {} batches",
            kind.as_str(),
            stats.records_read,
            stats.rows_written,
            stats.batches
        );
        Ok(stats)
    }

    fn write_batches<T, F>(&mut self, rows: &[T], mut write: F) -> AppResult<ImportStats>
    where
        F: FnMut(&mut Database, &[T]) -> AppResult<usize>,
    {
        let mut stats = ImportStats {
            records_read: rows.len(),
            ..ImportStats::default()
        };
        for chunk in rows.chunks(self.batch_size) {
            stats.rows_written += write(&mut self.database, chunk)?;
            stats.batches += 1;
            debug!("Batch {} written ({} rows)", stats.batches, chunk.len());
        }
        Ok(stats)
    }
}

/// Deserialize and convert every record, failing on the first bad line
fn read_rows<R, Row, T, F>(reader: R, convert: F) -> AppResult<Vec<T>>
where
    R: Read,
    Row: DeserializeOwned,
    F: Fn(Row, usize) -> AppResult<T>,
{
    let mut csv_reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut record = StringRecord::new();
    let mut rows = Vec::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let row: Row = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid(line, e.to_string()))?;
        rows.push(convert(row, line)?);
    }
    Ok(rows)
}
