//! Moving Average Convergence Divergence.
//!
//! MACD line = EMA(fast) - EMA(slow); signal line = EMA(MACD line, signal).
//! Because the recursive EMA is total, both lines are defined from the
//! first sample with no null-padded warmup.

use super::ema::ema;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
}

pub fn macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast_ema = ema(prices, fast);
    let slow_ema = ema(prices, slow);

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&macd_line, signal);

    MacdSeries {
        macd_line,
        signal_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constant_prices_give_all_zero_lines() {
        let series = macd(&[250.0; 40], 12, 26, 9);

        assert_eq!(series.macd_line.len(), 40);
        assert_eq!(series.signal_line.len(), 40);
        for i in 0..40 {
            assert_relative_eq!(series.macd_line[i], 0.0);
            assert_relative_eq!(series.signal_line[i], 0.0);
        }
    }

    #[test]
    fn defined_from_the_first_sample() {
        let prices: Vec<f64> = (0..5).map(|i| 100.0 + i as f64).collect();
        let series = macd(&prices, 12, 26, 9);

        assert!(series.macd_line[0].is_finite());
        assert!(series.signal_line[0].is_finite());
        // Both EMAs seed on the same sample, so the lines open at zero.
        assert_relative_eq!(series.macd_line[0], 0.0);
    }

    #[test]
    fn rising_prices_push_the_fast_ema_ahead() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64) * 2.0).collect();
        let series = macd(&prices, 12, 26, 9);

        // A sustained uptrend keeps the fast EMA above the slow one.
        for v in series.macd_line.iter().skip(1) {
            assert!(*v > 0.0);
        }
    }

    #[test]
    fn macd_line_matches_ema_difference() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + ((i * 7) % 13) as f64).collect();
        let series = macd(&prices, 3, 5, 2);

        let fast = ema(&prices, 3);
        let slow = ema(&prices, 5);
        for i in 0..prices.len() {
            assert_relative_eq!(series.macd_line[i], fast[i] - slow[i]);
        }
    }

    #[test]
    fn empty_input_gives_empty_lines() {
        let series = macd(&[], 12, 26, 9);
        assert!(series.macd_line.is_empty());
        assert!(series.signal_line.is_empty());
    }
}
