//! Promotion traffic reporting - Type System
//!
//! - `traffic`: time buckets, samples and series scopes
//! - `promotion`: promoted items, schedule intervals, market occupancy, layout blocks
//! - `report`: typed table cells, rows and the CSV encoding
//! - `visualisation`: chart series and their Plotly rendering

pub mod promotion;
pub mod report;
pub mod traffic;
pub mod visualisation;

pub use promotion::{
    BidHistoryPoint, Cents, LayoutBlock, MarketOccupancy, PromoteStatus, PromotedItem,
    PromoterTotal, PromotionInterval, PromotionRecord, ReportWindow, Viewer,
};
pub use report::{AggregatedRow, Cell, CellClass, CellValue, Table, MISSING_PERCENT};
pub use traffic::{
    total_of, Resolution, SummaryKind, TimeBucket, TrafficSample, TrafficScope,
    TrafficSeries,
};
pub use visualisation::{ChartSeries, PlotlyChart};
