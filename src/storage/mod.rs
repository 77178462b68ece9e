//! Snapshot store: numeric coercion plus one-CSV-per-(date, page) persistence.
//!
//! Coercion never rejects a row — a numeric cell that fails to parse becomes
//! a null, which is distinct from zero. Saving overwrites any prior file for
//! the same key; loading re-coerces with the same null-on-failure rule, so a
//! stored snapshot reads back equal to what was written.

use crate::models::{CleanRow, ListingRecord, Snapshot};
use crate::scraper::cleaner::parse_numeric;
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Header row of a persisted snapshot, in record-field order.
pub const SNAPSHOT_HEADER: [&str; 7] = [
    "name",
    "price",
    "delta",
    "rate",
    "volume",
    "trade_value",
    "market_cap",
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("not a snapshot file: {}", .0.display())]
    UnrecognizedFilename(PathBuf),
}

// ── Coercion ──────────────────────────────────────────────────────────────────

/// Coerce normalized text rows into typed records. A cell that fails the
/// numeric parse becomes `None`; the row itself is always kept.
pub fn coerce_rows(rows: &[CleanRow]) -> Vec<ListingRecord> {
    rows.iter()
        .map(|row| ListingRecord {
            name: row.name.clone(),
            price: parse_numeric(&row.price),
            delta: parse_numeric(&row.delta),
            rate: parse_numeric(&row.rate),
            volume: parse_numeric(&row.volume),
            trade_value: row.trade_value.clone(),
            market_cap: row.market_cap.clone(),
        })
        .collect()
}

// ── Filename key ──────────────────────────────────────────────────────────────

/// 2026-08-23, page 3 → `20260823_page_3.csv`
pub fn snapshot_filename(date: NaiveDate, page: u32) -> String {
    format!("{}_page_{}.csv", date.format("%Y%m%d"), page)
}

/// Recover the (date, page) key from a snapshot filename.
pub fn parse_snapshot_filename(path: &Path) -> Option<(NaiveDate, u32)> {
    if !path.extension().map(|e| e == "csv").unwrap_or(false) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (date, page) = stem.split_once("_page_")?;
    let date = NaiveDate::parse_from_str(date, "%Y%m%d").ok()?;
    let page = page.parse().ok()?;
    Some((date, page))
}

// ── Store ─────────────────────────────────────────────────────────────────────

pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist one snapshot under its (date, page) key, overwriting any
    /// prior file for that key. Numeric cells are written separator-free;
    /// nulls are empty cells.
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(snapshot_filename(snapshot.date, snapshot.page));

        let mut writer = WriterBuilder::new().has_headers(false).from_path(&path)?;
        writer.write_record(SNAPSHOT_HEADER)?;
        for record in &snapshot.records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        debug!("wrote {} records to {:?}", snapshot.records.len(), path);
        Ok(path)
    }

    /// Load a stored snapshot; the (date, page) key comes from the filename.
    pub fn load(&self, path: &Path) -> Result<Snapshot, StoreError> {
        let (date, page) = parse_snapshot_filename(path)
            .ok_or_else(|| StoreError::UnrecognizedFilename(path.to_path_buf()))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let mut records = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("row {} in {:?}: {}", i + 1, path, e);
                    continue;
                }
            };

            records.push(ListingRecord {
                name: row.get(0).unwrap_or("").to_string(),
                price: row.get(1).and_then(parse_numeric),
                delta: row.get(2).and_then(parse_numeric),
                rate: row.get(3).and_then(parse_numeric),
                volume: row.get(4).and_then(parse_numeric),
                trade_value: row.get(5).unwrap_or("").to_string(),
                market_cap: row.get(6).unwrap_or("").to_string(),
            });
        }

        debug!("loaded {} records from {:?}", records.len(), path);
        Ok(Snapshot {
            date,
            page,
            records,
        })
    }

    /// Pages with a stored snapshot for `date`, ascending. A store directory
    /// that does not exist yet is just empty.
    pub fn list(&self, date: NaiveDate) -> Result<Vec<u32>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some((d, page)) = parse_snapshot_filename(&path) {
                if d == date {
                    pages.push(page);
                }
            }
        }
        pages.sort_unstable();
        Ok(pages)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
