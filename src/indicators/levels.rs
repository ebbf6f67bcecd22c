//! Support and resistance levels from local price extrema
//!
//! A bar is a local low when its low is strictly below the lows of the
//! `neighbor_window` bars on each side; local highs mirror this on highs.
//! Lows under the current price become support, highs over it resistance,
//! each ranked by distance to the current price.

use serde::{Deserialize, Serialize};

use crate::config::LevelParams;
use crate::models::{Bar, PriceLevel};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: Vec<PriceLevel>,
    pub resistance: Vec<PriceLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Extremum {
    Low,
    High,
}

/// Find the nearest support and resistance levels around `current_price`
///
/// Ties in distance keep scan order (oldest bar first).
pub fn find_support_resistance(
    bars: &[Bar],
    current_price: f64,
    params: &LevelParams,
) -> SupportResistance {
    let window = params.neighbor_window;
    let span = window.checked_mul(2).and_then(|w| w.checked_add(1));
    if window == 0 || span.map_or(true, |span| bars.len() < span) {
        return SupportResistance::default();
    }

    let mut support = Vec::new();
    let mut resistance = Vec::new();

    for i in window..bars.len() - window {
        if is_extremum(bars, i, window, Extremum::Low) && bars[i].low < current_price {
            support.push(PriceLevel {
                price: bars[i].low,
                date: bars[i].date,
            });
        }
        if is_extremum(bars, i, window, Extremum::High) && bars[i].high > current_price {
            resistance.push(PriceLevel {
                price: bars[i].high,
                date: bars[i].date,
            });
        }
    }

    SupportResistance {
        support: nearest(support, current_price, params.max_levels),
        resistance: nearest(resistance, current_price, params.max_levels),
    }
}

fn is_extremum(bars: &[Bar], i: usize, window: usize, kind: Extremum) -> bool {
    let value = |bar: &Bar| match kind {
        Extremum::Low => bar.low,
        Extremum::High => bar.high,
    };
    let center = value(&bars[i]);

    bars[i - window..=i + window]
        .iter()
        .enumerate()
        .filter(|(offset, _)| *offset != window)
        .all(|(_, neighbor)| match kind {
            Extremum::Low => center < value(neighbor),
            Extremum::High => center > value(neighbor),
        })
}

fn nearest(mut levels: Vec<PriceLevel>, current_price: f64, cap: usize) -> Vec<PriceLevel> {
    // sort_by is stable, so equal distances keep scan order
    levels.sort_by(|a, b| {
        let da = (a.price - current_price).abs();
        let db = (b.price - current_price).abs();
        da.total_cmp(&db)
    });
    levels.truncate(cap);
    levels
}
