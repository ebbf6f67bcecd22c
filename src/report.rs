//! Report assembly
//!
//! Runs every indicator and classifier over one bar snapshot and collects
//! the latest values into an [`AnalysisReport`]. Pure: the same bars and
//! config always give the same report.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::indicators::{
    calculate_macd, calculate_rsi, detect_gaps, find_support_resistance, sma, GapAnalysis,
    SupportResistance,
};
use crate::models::{closes, Bar, IndicatorSeries};
use crate::signals::{
    classify_macd, classify_rsi, classify_trend, classify_volume, MacdSignal, RsiAnalysis,
    Strength, Trend, VolumeAnalysis,
};
use crate::validation::validate_series;
use crate::Result;

/// Latest value of each indicator, rounded for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub dif: Option<f64>,
    pub dea: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub rsi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub trend: Trend,
    pub strength: Option<Strength>,
    pub description: String,
}

impl From<Trend> for TrendAnalysis {
    fn from(trend: Trend) -> Self {
        Self {
            trend,
            strength: trend.strength(),
            description: trend.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub current_price: f64,
    pub bar_count: usize,
    pub indicators: IndicatorSnapshot,
    pub trend: TrendAnalysis,
    pub macd_signals: Vec<MacdSignal>,
    pub rsi: RsiAnalysis,
    pub volume: VolumeAnalysis,
    pub support_resistance: SupportResistance,
    pub gaps: GapAnalysis,
}

/// Run the full technical analysis over `bars` (oldest first)
///
/// `current_price` defaults to the latest close. Fails only on invalid input;
/// indicators lacking history come back as `None` / insufficient-data labels.
pub fn analyze(
    bars: &[Bar],
    current_price: Option<f64>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    validate_series(bars)?;
    config.validate()?;

    let closes = closes(bars);
    let current_price = match current_price {
        Some(price) if !price.is_finite() => return Err(AnalysisError::InvalidPrice(price)),
        Some(price) => price,
        None => closes[closes.len() - 1],
    };

    let latest_ma = config.sma.as_array().map(|period| latest(&sma(&closes, period)));
    let macd = calculate_macd(&closes, &config.macd);
    let rsi = calculate_rsi(&closes, config.rsi.period);

    let support_resistance = find_support_resistance(bars, current_price, &config.levels);
    let gaps = detect_gaps(bars);

    let trend = classify_trend(latest_ma);
    let macd_signals = classify_macd(&macd);
    let rsi_analysis = classify_rsi(latest(&rsi), &config.rsi);
    let mut volume = classify_volume(bars, &config.volume);
    volume.ratio = volume.ratio.map(|r| round_to(r, 2));

    let [ma5, ma10, ma20, ma60] = latest_ma.map(|v| v.map(|x| round_to(x, 2)));
    let indicators = IndicatorSnapshot {
        ma5,
        ma10,
        ma20,
        ma60,
        dif: latest(&macd.dif).map(|x| round_to(x, 4)),
        dea: latest(&macd.dea).map(|x| round_to(x, 4)),
        macd_histogram: latest(&macd.histogram).map(|x| round_to(x, 4)),
        rsi: rsi_analysis.value.map(|x| round_to(x, 2)),
    };

    tracing::debug!(
        bars = bars.len(),
        current_price,
        trend = trend.label(),
        rsi_zone = rsi_analysis.zone.label(),
        volume = volume.level.label(),
        supports = support_resistance.support.len(),
        resistances = support_resistance.resistance.len(),
        has_gaps = gaps.has_gaps,
        "analysis complete"
    );

    Ok(AnalysisReport {
        current_price,
        bar_count: bars.len(),
        indicators,
        trend: trend.into(),
        macd_signals,
        rsi: RsiAnalysis {
            value: rsi_analysis.value.map(|x| round_to(x, 2)),
            ..rsi_analysis
        },
        volume,
        support_resistance,
        gaps,
    })
}

fn latest(series: &IndicatorSeries) -> Option<f64> {
    series.last().copied().flatten()
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
