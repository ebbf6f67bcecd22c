//! Moving Average Convergence Divergence (MACD)
//!
//! DIF is the fast EMA minus the slow EMA, DEA is an EMA of DIF, and the
//! histogram is `(DIF - DEA) * 2`.

use super::moving_average::ema;
use crate::config::MacdParams;
use crate::models::IndicatorSeries;

/// DIF, DEA and histogram series, each aligned with the input
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub dif: IndicatorSeries,
    pub dea: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

impl MacdSeries {
    fn undefined(len: usize) -> Self {
        Self {
            dif: vec![None; len],
            dea: vec![None; len],
            histogram: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.dif.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dif.is_empty()
    }
}

/// Calculate MACD over closing prices (oldest first)
///
/// Everything is undefined while there are fewer closes than the slow period.
/// Undefined DIF entries are smoothed as 0 when building the signal line.
pub fn calculate_macd(closes: &[f64], params: &MacdParams) -> MacdSeries {
    if closes.len() < params.slow {
        return MacdSeries::undefined(closes.len());
    }

    let ema_fast = ema(closes, params.fast);
    let ema_slow = ema(closes, params.slow);

    let dif: IndicatorSeries = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| Some((*fast)? - (*slow)?))
        .collect();

    let dif_filled: Vec<f64> = dif.iter().map(|d| d.unwrap_or(0.0)).collect();
    let dea = ema(&dif_filled, params.signal);

    let histogram = dif
        .iter()
        .zip(&dea)
        .map(|(d, s)| Some(((*d)? - (*s)?) * 2.0))
        .collect();

    MacdSeries {
        dif,
        dea,
        histogram,
    }
}
