use crate::models::IndicatorSeries;

/// Simple Moving Average (SMA) aligned with the input
///
/// Index `i >= period - 1` holds the mean of `values[i + 1 - period..=i]`;
/// earlier indices are `None`. A series shorter than `period` yields all `None`.
pub fn sma(values: &[f64], period: usize) -> IndicatorSeries {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    for (i, window) in values.windows(period).enumerate() {
        let sum: f64 = window.iter().sum();
        out[i + period - 1] = Some(sum / period as f64);
    }

    out
}

/// Latest SMA value, if the series is long enough
pub fn latest_sma(values: &[f64], period: usize) -> Option<f64> {
    sma(values, period).last().copied().flatten()
}

/// Exponential Moving Average (EMA) aligned with the input
///
/// Seeded with the first value. Until index `period - 1` the raw value is
/// passed through unchanged (no partial average); from there on
/// `ema[i] = (value[i] - ema[i-1]) * 2 / (period + 1) + ema[i-1]`.
/// A series shorter than `period` yields all `None`.
pub fn ema(values: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(Some(prev));

    for (i, &value) in values.iter().enumerate().skip(1) {
        let current = if i < period - 1 {
            value
        } else {
            (value - prev) * multiplier + prev
        };
        out.push(Some(current));
        prev = current;
    }

    out
}
