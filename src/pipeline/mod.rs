//! Crawl orchestration: ties source → extractor → cleaner → store together.
//!
//! One run fetches a single listing page, normalizes it, and persists the
//! snapshot under today's (date, page) key, overwriting any earlier crawl
//! of the same key. The load/view/indicator paths are independent of this
//! and read whatever the store holds.

use crate::models::Snapshot;
use crate::scraper::cleaner::clean_row;
use crate::scraper::parsers::extract_listing_rows;
use crate::scraper::ListingSource;
use crate::storage::{coerce_rows, SnapshotStore};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use tracing::info;

pub struct Pipeline<S: ListingSource> {
    source: S,
    store: SnapshotStore,
}

#[derive(Debug)]
pub struct CrawlReport {
    pub path: PathBuf,
    pub rows_kept: usize,
}

impl<S: ListingSource> Pipeline<S> {
    pub fn new(source: S, store: SnapshotStore) -> Self {
        Self { source, store }
    }

    /// Fetch one listing page and persist it as today's snapshot for that
    /// page number. Transport and page-structure failures surface here;
    /// data-quality problems never do (bad cells become nulls upstream,
    /// misshapen rows are already gone).
    pub async fn crawl_and_store(&self, page: u32) -> Result<CrawlReport> {
        let html = self
            .source
            .fetch_page(page)
            .await
            .with_context(|| format!("fetching listing page {page}"))?;

        let raw_rows = extract_listing_rows(&html)
            .with_context(|| format!("extracting listing table from page {page}"))?;
        let cleaned: Vec<_> = raw_rows.iter().map(clean_row).collect();

        let snapshot = Snapshot {
            date: Local::now().date_naive(),
            page,
            records: coerce_rows(&cleaned),
        };

        let path = self
            .store
            .save(&snapshot)
            .with_context(|| format!("persisting snapshot for page {page}"))?;

        info!(
            "page {}: {} rows -> {}",
            page,
            snapshot.records.len(),
            path.display()
        );

        Ok(CrawlReport {
            path,
            rows_kept: snapshot.records.len(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
