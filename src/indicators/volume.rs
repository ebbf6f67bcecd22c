//! Volume averages and ratios

use crate::models::Bar;

/// Average volume over the last `lookback` bars (or all bars if fewer)
pub fn average_volume(bars: &[Bar], lookback: usize) -> Option<f64> {
    let count = lookback.min(bars.len());
    if count == 0 {
        return None;
    }

    let recent = &bars[bars.len() - count..];
    let total: f64 = recent.iter().map(|b| b.volume).sum();
    Some(total / count as f64)
}

/// Latest volume divided by the trailing average (latest bar included)
///
/// Returns 0.0 when the average is not positive, None for an empty series.
pub fn volume_ratio(bars: &[Bar], lookback: usize) -> Option<f64> {
    let latest = bars.last()?.volume;
    let avg = average_volume(bars, lookback)?;

    if avg > 0.0 {
        Some(latest / avg)
    } else {
        Some(0.0)
    }
}
