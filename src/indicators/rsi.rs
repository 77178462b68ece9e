//! Relative Strength Index over a trailing simple-average window.
//!
//! Successive differences are split into gains and losses, each averaged
//! over the last `period` samples, then RSI = 100 - 100/(1 + RS) with
//! RS = avg_gain / avg_loss. All losses zero with gains present drives RS
//! to infinity and RSI saturates at 100; a window with no movement at all
//! is 0/0 and stays undefined.

/// RSI over `prices`, same length as the input. The first `period` entries
/// are `None` (a full window of differences needs `period + 1` samples), as
/// is any entry whose window touches a non-finite price.
pub fn rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; prices.len()];
    if period == 0 {
        return out;
    }

    for i in period..prices.len() {
        let mut gain = 0.0;
        let mut loss = 0.0;
        let mut defined = true;

        for j in (i + 1 - period)..=i {
            let diff = prices[j] - prices[j - 1];
            if !diff.is_finite() {
                defined = false;
                break;
            }
            if diff > 0.0 {
                gain += diff;
            } else {
                loss -= diff;
            }
        }
        if !defined {
            continue;
        }

        let avg_gain = gain / period as f64;
        let avg_loss = loss / period as f64;
        // RS may be infinite (no losses) or NaN (no movement either way);
        // the former saturates cleanly, the latter stays undefined.
        let rs = avg_gain / avg_loss;
        let value = 100.0 - 100.0 / (1.0 + rs);
        out[i] = value.is_finite().then_some(value);
    }

    out
}
