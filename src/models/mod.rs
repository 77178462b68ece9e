use chrono::NaiveDate;
use serde::Serialize;

// ── Delta marker ──────────────────────────────────────────────────────────────

/// Direction tag read from the delta cell's `<em>` class attribute.
///
/// The listing page encodes the sign of the price change visually, not in the
/// numeric text: `bu_pdn` means the instrument fell, `bu_pup` that it rose.
/// `Absent` covers both a missing `<em>` and one carrying neither class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaMarker {
    Up,
    Down,
    Absent,
}

/// The delta cell as extracted: the magnitude text from its `span.tah`
/// sub-element plus the sign marker. `text` is `"0"` when the sub-element
/// is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDeltaCell {
    pub text: String,
    pub marker: DeltaMarker,
}

// ── Raw listing row ───────────────────────────────────────────────────────────

/// One listing-table row as pulled out of the HTML, before any text cleanup.
/// Only rows with exactly seven cells ever become one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct RawListingRow {
    pub name: String,
    pub price: String,
    pub delta: RawDeltaCell,
    pub rate: String,
    pub volume: String,
    pub trade_value: String,
    pub market_cap: String,
}

/// Normalized text row: trimmed, separators and percent suffix stripped,
/// delta sign rule applied. Still all text; numeric coercion happens in the
/// snapshot store.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub name: String,
    pub price: String,
    pub delta: String,
    pub rate: String,
    pub volume: String,
    pub trade_value: String,
    pub market_cap: String,
}

// ── Listing record ────────────────────────────────────────────────────────────

/// One instrument's coerced snapshot row. A numeric field is `None` when its
/// text failed to parse; the row itself is always kept. `trade_value` and
/// `market_cap` stay text until a consumer derives numbers from a copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub name: String,
    pub price: Option<f64>,
    pub delta: Option<f64>,
    pub rate: Option<f64>,
    pub volume: Option<f64>,
    pub trade_value: String,
    pub market_cap: String,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Ordered listing records for one (date, page) key. Created once by the
/// crawl path, persisted once, loaded read-only; a later crawl for the same
/// key overwrites the stored copy outright.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub page: u32,
    pub records: Vec<ListingRecord>,
}
