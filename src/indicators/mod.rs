//! Technical indicators over the snapshot's price column.
//!
//! The functions here are generic over any ordered `&[f64]` — they know
//! nothing about instruments or dates, so the same code serves a proper
//! per-instrument time series later. Today they run over the listing's
//! ranking order, which is what the data gives us; that usage is
//! cross-sectional, not chronological, and callers should treat the output
//! accordingly.

pub mod ema;
pub mod macd;
pub mod rsi;

use crate::models::Snapshot;

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// Per-row indicator values, aligned index-for-index with the snapshot's
/// records. `None` marks the RSI warmup window and any position where a
/// null price made the value undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub rsi: Vec<Option<f64>>,
    pub macd_line: Vec<Option<f64>>,
    pub signal_line: Vec<Option<f64>>,
}

/// Compute the standard 14-period RSI and 12/26/9 MACD over a loaded
/// snapshot's price column. Null prices enter the math as NaN and come
/// back out as `None`.
pub fn compute_indicators(snapshot: &Snapshot) -> IndicatorSet {
    let prices: Vec<f64> = snapshot
        .records
        .iter()
        .map(|r| r.price.unwrap_or(f64::NAN))
        .collect();

    let macd = macd::macd(&prices, MACD_FAST, MACD_SLOW, MACD_SIGNAL);

    IndicatorSet {
        rsi: rsi::rsi(&prices, RSI_PERIOD),
        macd_line: finite_or_none(macd.macd_line),
        signal_line: finite_or_none(macd.signal_line),
    }
}

fn finite_or_none(values: Vec<f64>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|v| v.is_finite().then_some(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingRecord;
    use chrono::NaiveDate;

    fn snapshot(prices: &[Option<f64>]) -> Snapshot {
        Snapshot {
            date: NaiveDate::from_ymd_opt(2026, 8, 23).unwrap(),
            page: 1,
            records: prices
                .iter()
                .enumerate()
                .map(|(i, &price)| ListingRecord {
                    name: format!("Stock {i}"),
                    price,
                    delta: Some(0.0),
                    rate: Some(0.0),
                    volume: Some(1000.0),
                    trade_value: String::new(),
                    market_cap: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn series_align_with_rows() {
        let prices: Vec<Option<f64>> = (0..30).map(|i| Some(100.0 + i as f64)).collect();
        let set = compute_indicators(&snapshot(&prices));

        assert_eq!(set.rsi.len(), 30);
        assert_eq!(set.macd_line.len(), 30);
        assert_eq!(set.signal_line.len(), 30);
    }

    #[test]
    fn null_price_surfaces_as_none_not_zero() {
        let mut prices: Vec<Option<f64>> = (0..30).map(|i| Some(100.0 + i as f64)).collect();
        prices[20] = None;

        let set = compute_indicators(&snapshot(&prices));

        // Every RSI window touching the gap is undefined.
        for i in 20..(20 + RSI_PERIOD + 1).min(30) {
            assert_eq!(set.rsi[i], None, "index {i}");
        }
        // MACD carries through the gap; rows on either side stay defined.
        assert!(set.macd_line[19].is_some());
        assert!(set.macd_line[21].is_some());
    }

    #[test]
    fn empty_snapshot_yields_empty_series() {
        let set = compute_indicators(&snapshot(&[]));
        assert!(set.rsi.is_empty());
        assert!(set.macd_line.is_empty());
        assert!(set.signal_line.is_empty());
    }
}
