use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One indicator value per bar; `None` until the indicator has warmed up
pub type IndicatorSeries = Vec<Option<f64>>;

/// Daily OHLCV bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Extract closing prices from bars
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extract volumes from bars
pub fn volumes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}

/// Support or resistance price taken from a local extremum
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceLevel {
    pub price: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    Up,
    Down,
}

/// Heuristic role of a gap: up-gaps tend to act as support, down-gaps as resistance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GapRole {
    Support,
    Resistance,
}

impl GapKind {
    pub fn role(self) -> GapRole {
        match self {
            GapKind::Up => GapRole::Support,
            GapKind::Down => GapRole::Resistance,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GapKind::Up => "up",
            GapKind::Down => "down",
        }
    }
}

impl GapRole {
    pub fn label(self) -> &'static str {
        match self {
            GapRole::Support => "support",
            GapRole::Resistance => "resistance",
        }
    }
}

/// Price discontinuity between a bar and the bar before it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GapEvent {
    pub kind: GapKind,
    /// Date of the bar that opened away from the prior range
    pub date: NaiveDate,
    /// Date of the prior bar
    pub reference_date: NaiveDate,
    /// Unfilled range as `[low, high]`
    pub price_range: [f64; 2],
    pub size: f64,
    pub pct: f64,
    pub role: GapRole,
}
