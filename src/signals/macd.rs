use serde::{Deserialize, Serialize};

use crate::indicators::MacdSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdSignal {
    InsufficientData,
    /// DIF crossed above DEA (buy)
    GoldenCross,
    /// DIF crossed below DEA (sell)
    DeathCross,
    BullishMomentumIncreasing,
    BullishMomentumDecreasing,
    BearishMomentumIncreasing,
    BearishMomentumDecreasing,
    NoClearSignal,
}

impl MacdSignal {
    pub fn label(self) -> &'static str {
        match self {
            MacdSignal::InsufficientData => "insufficient data",
            MacdSignal::GoldenCross => "golden cross (buy signal)",
            MacdSignal::DeathCross => "death cross (sell signal)",
            MacdSignal::BullishMomentumIncreasing => {
                "positive histogram expanding (bullish momentum increasing)"
            }
            MacdSignal::BullishMomentumDecreasing => {
                "positive histogram contracting (bullish momentum decreasing)"
            }
            MacdSignal::BearishMomentumIncreasing => {
                "negative histogram expanding (bearish momentum increasing)"
            }
            MacdSignal::BearishMomentumDecreasing => {
                "negative histogram contracting (bearish momentum decreasing)"
            }
            MacdSignal::NoClearSignal => "no clear signal",
        }
    }
}

/// Derive MACD signals from the latest two DIF/DEA/histogram points
///
/// Crosses and histogram direction are checked independently, so several
/// signals can be returned together. An empty match yields `NoClearSignal`.
pub fn classify_macd(macd: &MacdSeries) -> Vec<MacdSignal> {
    let n = macd.len();
    if n < 2 {
        return vec![MacdSignal::InsufficientData];
    }

    let (Some(dif), Some(dea), Some(hist), Some(prev_dif), Some(prev_dea)) = (
        macd.dif[n - 1],
        macd.dea[n - 1],
        macd.histogram[n - 1],
        macd.dif[n - 2],
        macd.dea[n - 2],
    ) else {
        return vec![MacdSignal::InsufficientData];
    };

    let mut signals = Vec::new();

    if prev_dif <= prev_dea && dif > dea {
        signals.push(MacdSignal::GoldenCross);
    }
    if prev_dif >= prev_dea && dif < dea {
        signals.push(MacdSignal::DeathCross);
    }

    if let Some(prev_hist) = macd.histogram[n - 2] {
        if hist > 0.0 && prev_hist > 0.0 {
            if hist > prev_hist {
                signals.push(MacdSignal::BullishMomentumIncreasing);
            } else if hist < prev_hist {
                signals.push(MacdSignal::BullishMomentumDecreasing);
            }
        } else if hist < 0.0 && prev_hist < 0.0 {
            if hist < prev_hist {
                signals.push(MacdSignal::BearishMomentumIncreasing);
            } else if hist > prev_hist {
                signals.push(MacdSignal::BearishMomentumDecreasing);
            }
        }
    }

    if signals.is_empty() {
        signals.push(MacdSignal::NoClearSignal);
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> MacdSeries {
        MacdSeries {
            dif: points.iter().map(|p| Some(p.0)).collect(),
            dea: points.iter().map(|p| Some(p.1)).collect(),
            histogram: points.iter().map(|p| Some((p.0 - p.1) * 2.0)).collect(),
        }
    }

    #[test]
    fn test_golden_cross() {
        // Histogram flips from -0.2 to +0.2, so no momentum signal
        let signals = classify_macd(&series(&[(0.9, 1.0), (1.1, 1.0)]));
        assert_eq!(signals, vec![MacdSignal::GoldenCross]);
    }

    #[test]
    fn test_golden_cross_from_touch() {
        let signals = classify_macd(&series(&[(1.0, 1.0), (1.2, 1.0)]));
        assert_eq!(signals, vec![MacdSignal::GoldenCross]);
    }

    #[test]
    fn test_death_cross() {
        let signals = classify_macd(&series(&[(1.1, 1.0), (0.9, 1.0)]));
        assert_eq!(signals, vec![MacdSignal::DeathCross]);
    }

    #[test]
    fn test_bullish_momentum() {
        let increasing = classify_macd(&series(&[(1.1, 1.0), (1.3, 1.0)]));
        assert_eq!(increasing, vec![MacdSignal::BullishMomentumIncreasing]);

        let decreasing = classify_macd(&series(&[(1.3, 1.0), (1.1, 1.0)]));
        assert_eq!(decreasing, vec![MacdSignal::BullishMomentumDecreasing]);
    }

    #[test]
    fn test_bearish_momentum() {
        let increasing = classify_macd(&series(&[(0.9, 1.0), (0.7, 1.0)]));
        assert_eq!(increasing, vec![MacdSignal::BearishMomentumIncreasing]);

        let decreasing = classify_macd(&series(&[(0.7, 1.0), (0.9, 1.0)]));
        assert_eq!(decreasing, vec![MacdSignal::BearishMomentumDecreasing]);
    }

    #[test]
    fn test_cross_and_momentum_together() {
        let macd = MacdSeries {
            dif: vec![Some(1.0), Some(1.5)],
            dea: vec![Some(1.0), Some(1.2)],
            histogram: vec![Some(0.1), Some(0.6)],
        };

        let signals = classify_macd(&macd);
        assert_eq!(
            signals,
            vec![MacdSignal::GoldenCross, MacdSignal::BullishMomentumIncreasing]
        );
    }

    #[test]
    fn test_flat_histogram_has_no_clear_signal() {
        let signals = classify_macd(&series(&[(1.2, 1.0), (1.2, 1.0)]));
        assert_eq!(signals, vec![MacdSignal::NoClearSignal]);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            classify_macd(&series(&[(1.0, 1.0)])),
            vec![MacdSignal::InsufficientData]
        );

        let undefined = MacdSeries {
            dif: vec![None, None, None],
            dea: vec![None, None, None],
            histogram: vec![None, None, None],
        };
        assert_eq!(classify_macd(&undefined), vec![MacdSignal::InsufficientData]);
    }
}
