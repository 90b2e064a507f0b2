//! Tabular report rows
//!
//! A [`Table`] is the single aggregated representation behind both on-page
//! tables and CSV export. Cells keep typed values and are rendered late,
//! either localized (thousands separators) or raw for machine consumption.

use crate::utils::format::format_number;
use crate::errors::{AppError, AppResult};
use crate::types::promotion::Cents;
use crate::utils::currency::format_cents;
use serde::{Deserialize, Serialize};

/// Placeholder shown where a ratio has no defined value
pub const MISSING_PERCENT: &str = "--.--%";

/// Display hint attached to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellClass {
    Up,
    Down,
    /// Projected estimate rather than an observed total
    Gray,
}

impl CellClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellClass::Up => "up",
            CellClass::Down => "down",
            CellClass::Gray => "gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Count(i64),
    Percent(f64),
    Money(Cents),
    Text(String),
    /// A ratio whose operands were zero or absent
    Missing,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<CellClass>,
}

impl Cell {
    pub fn count(n: u64) -> Self {
        Self::plain(CellValue::Count(i64::try_from(n).unwrap_or(i64::MAX)))
    }

    pub fn signed(n: i64) -> Self {
        Self::plain(CellValue::Count(n))
    }

    pub fn percent(p: f64) -> Self {
        Self::plain(CellValue::Percent(p))
    }

    pub fn money(cents: Cents) -> Self {
        Self::plain(CellValue::Money(cents))
    }

    pub fn text(s: &str) -> Self {
        Self::plain(CellValue::Text(s.to_string()))
    }

    pub fn missing() -> Self {
        Self::plain(CellValue::Missing)
    }

    pub fn blank() -> Self {
        Self::plain(CellValue::Blank)
    }

    fn plain(value: CellValue) -> Self {
        Self { value, class: None }
    }

    pub fn with_class(mut self, class: CellClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Render for display (`localize`) or for CSV
    pub fn render(&self, localize: bool) -> String {
        match &self.value {
            CellValue::Count(n) if localize => format_number(*n),
            CellValue::Count(n) => n.to_string(),
            CellValue::Percent(p) => format!("{:.2}%", p),
            CellValue::Money(cents) => format_cents(*cents),
            CellValue::Text(s) => s.clone(),
            CellValue::Missing => MISSING_PERCENT.to_string(),
            CellValue::Blank => String::new(),
        }
    }
}

/// One labelled row of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub label: String,
    pub cells: Vec<Cell>,
}

impl AggregatedRow {
    pub fn new(label: &str, cells: Vec<Cell>) -> Self {
        Self {
            label: label.to_string(),
            cells,
        }
    }

    pub fn render(&self, localize: bool) -> Vec<String> {
        std::iter::once(self.label.clone())
            .chain(self.cells.iter().map(|c| c.render(localize)))
            .collect()
    }
}

/// Rows with a declared column schema; the first column is the row label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<AggregatedRow>,
}

impl Table {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, rejecting any whose width disagrees with the schema
    pub fn push(&mut self, row: AggregatedRow) -> AppResult<()> {
        let expected = self.columns.len().saturating_sub(1);
        if row.cells.len() != expected {
            return Err(AppError::SchemaMismatch {
                label: row.label,
                expected,
                actual: row.cells.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self, localize: bool) -> Vec<Vec<String>> {
        self.rows.iter().map(|r| r.render(localize)).collect()
    }

    /// Delimited export with raw, unlocalized numbers
    pub fn to_csv(&self, include_header: bool) -> AppResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        if include_header {
            writer.write_record(&self.columns)?;
        }
        for record in self.records(false) {
            writer.write_record(&record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::InvalidData(format!("CSV flush failed: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::InvalidData(format!("CSV output not UTF-8: {}", e)))
    }
}
