//! Presentation views over a loaded snapshot: filter, sort, styling.
//!
//! Everything here works on ephemeral copies; the canonical snapshot is
//! never mutated. Filtering and sorting precede styling, and a sort that
//! hits an unparseable cell aborts as a whole — the table is handed back
//! filtered but in its original order, with the warning surfaced.

pub mod charts;

use crate::models::{ListingRecord, Snapshot};
use crate::scraper::cleaner::parse_numeric;
use crate::utils::fmt_thousands;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::warn;

// ── Filtering ─────────────────────────────────────────────────────────────────

/// Row filter over the `rate` column. A null rate is neither positive nor
/// negative, so both directional filters exclude it; `All` keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateFilter {
    #[default]
    All,
    Gainers,
    Losers,
}

impl RateFilter {
    pub fn keeps(self, rate: Option<f64>) -> bool {
        match self {
            RateFilter::All => true,
            RateFilter::Gainers => rate.is_some_and(|r| r > 0.0),
            RateFilter::Losers => rate.is_some_and(|r| r < 0.0),
        }
    }
}

// ── Sorting ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    Delta,
    Rate,
    Volume,
    TradeValue,
    MarketCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One unparseable cell fails the whole sort; the caller keeps the
/// pre-sort order and surfaces this as a warning, not an abort.
#[derive(Debug, Error, PartialEq)]
#[error("cannot sort by {column}: row {row} has unparseable value {value:?}")]
pub struct SortError {
    pub column: &'static str,
    pub row: usize,
    pub value: String,
}

impl SortKey {
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Delta => "delta",
            SortKey::Rate => "rate",
            SortKey::Volume => "volume",
            SortKey::TradeValue => "trade_value",
            SortKey::MarketCap => "market_cap",
        }
    }

    /// The cell's text form as it appears in a persisted snapshot: numeric
    /// fields render their value (empty when null), text fields pass
    /// through with separators intact.
    fn cell_text(self, record: &ListingRecord) -> String {
        let numeric = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        match self {
            SortKey::Name => record.name.clone(),
            SortKey::Price => numeric(record.price),
            SortKey::Delta => numeric(record.delta),
            SortKey::Rate => numeric(record.rate),
            SortKey::Volume => numeric(record.volume),
            SortKey::TradeValue => record.trade_value.clone(),
            SortKey::MarketCap => record.market_cap.clone(),
        }
    }
}

/// Stable sort in place. Numeric keys re-parse each row's textual cell
/// form with separators stripped; the first failure returns `SortError`
/// before anything moves, so the slice is untouched on error.
pub fn sort_records(
    records: &mut [ListingRecord],
    key: SortKey,
    order: SortOrder,
) -> Result<(), SortError> {
    if key == SortKey::Name {
        match order {
            SortOrder::Ascending => records.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::Descending => records.sort_by(|a, b| b.name.cmp(&a.name)),
        }
        return Ok(());
    }

    let mut keys = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        let text = key.cell_text(record);
        match parse_numeric(&text) {
            Some(v) => keys.push((v, record.clone())),
            None => {
                return Err(SortError {
                    column: key.column(),
                    row,
                    value: text,
                })
            }
        }
    }

    // Ties compare Equal either way, so the stable sort preserves the
    // incoming relative order in both directions.
    keys.sort_by(|(a, _), (b, _)| {
        let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });

    for (slot, (_, record)) in records.iter_mut().zip(keys) {
        *slot = record;
    }
    Ok(())
}

// ── Styling ───────────────────────────────────────────────────────────────────

/// Display tone for a styled cell; the shell maps these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Up,
    Down,
    Flat,
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    pub text: String,
    pub tone: Tone,
}

impl StyledCell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }
}

/// Delta as a direction glyph plus integer-truncated magnitude. A null
/// value has no styled form and passes through as its empty text.
pub fn style_delta(delta: Option<f64>) -> StyledCell {
    let Some(v) = delta else {
        return StyledCell::plain("");
    };
    if v > 0.0 {
        StyledCell {
            text: format!("▲ {}", fmt_thousands(v as i64)),
            tone: Tone::Up,
        }
    } else if v < 0.0 {
        StyledCell {
            text: format!("▼ {}", fmt_thousands((-v) as i64)),
            tone: Tone::Down,
        }
    } else {
        StyledCell {
            text: "● 0".to_string(),
            tone: Tone::Flat,
        }
    }
}

/// Rate as an explicit-sign two-decimal percentage.
pub fn style_rate(rate: Option<f64>) -> StyledCell {
    let Some(v) = rate else {
        return StyledCell::plain("");
    };
    let (sign, tone) = if v > 0.0 {
        ("+", Tone::Up)
    } else if v < 0.0 {
        ("-", Tone::Down)
    } else {
        ("", Tone::Flat)
    };
    StyledCell {
        text: format!("{sign}{:.2}%", v.abs()),
        tone,
    }
}

/// Price/volume as integer-truncated, thousands-separated text.
pub fn style_amount(value: Option<f64>) -> StyledCell {
    match value {
        Some(v) => StyledCell::plain(fmt_thousands(v as i64)),
        None => StyledCell::plain(""),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledRow {
    pub name: String,
    pub price: StyledCell,
    pub delta: StyledCell,
    pub rate: StyledCell,
    pub volume: StyledCell,
    pub trade_value: String,
    pub market_cap: String,
}

fn style_record(record: &ListingRecord) -> StyledRow {
    StyledRow {
        name: record.name.clone(),
        price: style_amount(record.price),
        delta: style_delta(record.delta),
        rate: style_rate(record.rate),
        volume: style_amount(record.volume),
        trade_value: record.trade_value.clone(),
        market_cap: record.market_cap.clone(),
    }
}

// ── View assembly ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTable {
    pub rows: Vec<StyledRow>,
    /// Present when a requested sort failed and the order shown is the
    /// filtered-but-unsorted one.
    pub sort_warning: Option<String>,
}

/// Filter, optionally sort, and style a snapshot for display. Works on a
/// copy; the snapshot itself is read-only.
pub fn apply_view(
    snapshot: &Snapshot,
    filter: RateFilter,
    sort: Option<(SortKey, SortOrder)>,
) -> ViewTable {
    let mut records: Vec<ListingRecord> = snapshot
        .records
        .iter()
        .filter(|r| filter.keeps(r.rate))
        .cloned()
        .collect();

    let mut sort_warning = None;
    if let Some((key, order)) = sort {
        if let Err(e) = sort_records(&mut records, key, order) {
            warn!("{e}");
            sort_warning = Some(e.to_string());
        }
    }

    ViewTable {
        rows: records.iter().map(style_record).collect(),
        sort_warning,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
