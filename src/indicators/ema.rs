//! Exponential moving average, unadjusted recursive form.
//!
//! α = 2/(span+1); the series seeds with the first sample and is defined
//! from index 0, with no warm-up bias correction.

/// EMA over `values`, same length as the input. A non-finite sample carries
/// the previous average forward; leading non-finite samples stay NaN until
/// the first finite one seeds the series.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &x in values {
        let next = match prev {
            _ if !x.is_finite() => prev.unwrap_or(f64::NAN),
            None => x,
            Some(p) => alpha * x + (1.0 - alpha) * p,
        };
        out.push(next);
        if next.is_finite() {
            prev = Some(next);
        }
    }

    out
}
