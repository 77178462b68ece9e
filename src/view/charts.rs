//! Chart payload derivation. Numeric data only; the shell owns rendering.

use crate::models::Snapshot;
use crate::scraper::cleaner::parse_numeric;
use serde::Serialize;
use thiserror::Error;

/// Snapshot columns available to the line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColumn {
    Price,
    Volume,
    Rate,
}

impl LineColumn {
    fn label(self) -> &'static str {
        match self {
            LineColumn::Price => "price",
            LineColumn::Volume => "volume",
            LineColumn::Rate => "rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: &'static str,
    pub values: Vec<Option<f64>>,
}

/// One series per requested column, all indexed by instrument name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// One bad market-cap cell fails the whole pie; the shell shows the
/// warning instead of a partial chart.
#[derive(Debug, Error)]
#[error("cannot chart market cap: {name:?} has unparseable value {value:?}")]
pub struct ChartError {
    pub name: String,
    pub value: String,
}

/// Line-chart payload over the requested columns, x-axis keyed by
/// instrument name. Nulls stay null; the chart widget decides how to
/// draw gaps.
pub fn line_chart(snapshot: &Snapshot, columns: &[LineColumn]) -> LineChart {
    let labels = snapshot.records.iter().map(|r| r.name.clone()).collect();

    let series = columns
        .iter()
        .map(|&col| LineSeries {
            label: col.label(),
            values: snapshot
                .records
                .iter()
                .map(|r| match col {
                    LineColumn::Price => r.price,
                    LineColumn::Volume => r.volume,
                    LineColumn::Rate => r.rate,
                })
                .collect(),
        })
        .collect();

    LineChart { labels, series }
}

/// Top-`top_n` market caps as pie slices. The market-cap column is text in
/// the snapshot; it is coerced here on a derived copy, and any cell that
/// fails the parse fails the derivation as a whole.
pub fn market_cap_pie(snapshot: &Snapshot, top_n: usize) -> Result<PieChart, ChartError> {
    let mut caps = Vec::with_capacity(snapshot.records.len());
    for record in &snapshot.records {
        let value = parse_numeric(&record.market_cap).ok_or_else(|| ChartError {
            name: record.name.clone(),
            value: record.market_cap.clone(),
        })?;
        caps.push((record.name.clone(), value));
    }

    caps.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    caps.truncate(top_n);

    Ok(PieChart {
        title: format!("Market cap top {top_n}"),
        slices: caps
            .into_iter()
            .map(|(label, value)| PieSlice { label, value })
            .collect(),
    })
}
