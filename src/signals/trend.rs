use serde::{Deserialize, Serialize};

/// Moving-average alignment of the latest SMA values
///
/// Classified by [`classify_trend`]; the branches overlap, so the order
/// they are tested in decides the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    InsufficientData,
    BullishAlignment,
    BearishAlignment,
    Tangled,
    ShortTermUp,
    ShortTermDown,
    Oscillating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Medium,
    Weak,
}

impl Trend {
    pub fn strength(self) -> Option<Strength> {
        match self {
            Trend::InsufficientData => None,
            Trend::BullishAlignment | Trend::BearishAlignment => Some(Strength::Strong),
            Trend::ShortTermUp | Trend::ShortTermDown => Some(Strength::Medium),
            Trend::Tangled | Trend::Oscillating => Some(Strength::Weak),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::InsufficientData => "insufficient data",
            Trend::BullishAlignment => "bullish alignment",
            Trend::BearishAlignment => "bearish alignment",
            Trend::Tangled => "tangled",
            Trend::ShortTermUp => "short-term up",
            Trend::ShortTermDown => "short-term down",
            Trend::Oscillating => "oscillating",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Trend::InsufficientData => "not enough history to judge the trend",
            Trend::BullishAlignment => {
                "moving averages in bullish order (MA5 > MA10 > MA20 > MA60), short-term trend is up"
            }
            Trend::BearishAlignment => {
                "moving averages in bearish order (MA5 < MA10 < MA20 < MA60), short-term trend is down"
            }
            Trend::Tangled => "moving averages are intertwined, trend unclear, consolidating",
            Trend::ShortTermUp => "short-term averages rising, longer-term trend unconfirmed",
            Trend::ShortTermDown => "short-term averages falling, longer-term trend unconfirmed",
            Trend::Oscillating => "no clear moving-average order, market is range-bound",
        }
    }
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Strength::Strong => "strong",
            Strength::Medium => "medium",
            Strength::Weak => "weak",
        }
    }
}

/// Classify the trend from the latest `[MA5, MA10, MA20, MA60]` values
///
/// First match wins:
/// 1. MA5 > MA10 > MA20 > MA60 → bullish alignment
/// 2. MA5 < MA10 < MA20 < MA60 → bearish alignment
/// 3. MA5 > MA10 and MA10 < MA20 → tangled
/// 4. MA5 > MA10 > MA20 → short-term up
/// 5. MA5 < MA10 < MA20 → short-term down
/// 6. otherwise → oscillating
pub fn classify_trend(latest: [Option<f64>; 4]) -> Trend {
    let [Some(ma5), Some(ma10), Some(ma20), Some(ma60)] = latest else {
        return Trend::InsufficientData;
    };

    if ma5 > ma10 && ma10 > ma20 && ma20 > ma60 {
        Trend::BullishAlignment
    } else if ma5 < ma10 && ma10 < ma20 && ma20 < ma60 {
        Trend::BearishAlignment
    } else if ma5 > ma10 && ma10 < ma20 {
        Trend::Tangled
    } else if ma5 > ma10 && ma10 > ma20 {
        Trend::ShortTermUp
    } else if ma5 < ma10 && ma10 < ma20 {
        Trend::ShortTermDown
    } else {
        Trend::Oscillating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ma(values: [f64; 4]) -> [Option<f64>; 4] {
        values.map(Some)
    }

    #[test]
    fn test_bullish_alignment() {
        let trend = classify_trend(ma([10.0, 9.0, 8.0, 7.0]));
        assert_eq!(trend, Trend::BullishAlignment);
        assert_eq!(trend.strength(), Some(Strength::Strong));
    }

    #[test]
    fn test_bearish_alignment() {
        let trend = classify_trend(ma([7.0, 8.0, 9.0, 10.0]));
        assert_eq!(trend, Trend::BearishAlignment);
        assert_eq!(trend.strength(), Some(Strength::Strong));
    }

    #[test]
    fn test_tangled() {
        // MA5 > MA10 < MA20
        let trend = classify_trend(ma([9.0, 8.0, 10.0, 7.0]));
        assert_eq!(trend, Trend::Tangled);
        assert_eq!(trend.strength(), Some(Strength::Weak));
    }

    #[test]
    fn test_full_alignment_wins_over_short_term() {
        // Both also satisfy the short-term rules
        assert_eq!(classify_trend(ma([10.0, 9.0, 8.0, 7.0])), Trend::BullishAlignment);
        assert_eq!(classify_trend(ma([7.0, 8.0, 9.0, 10.0])), Trend::BearishAlignment);
    }

    #[test]
    fn test_short_term_up() {
        // MA60 on top breaks the full alignment
        let trend = classify_trend(ma([10.0, 9.0, 8.0, 11.0]));
        assert_eq!(trend, Trend::ShortTermUp);
        assert_eq!(trend.strength(), Some(Strength::Medium));
    }

    #[test]
    fn test_short_term_down() {
        let trend = classify_trend(ma([7.0, 8.0, 9.0, 6.0]));
        assert_eq!(trend, Trend::ShortTermDown);
        assert_eq!(trend.strength(), Some(Strength::Medium));
    }

    #[test]
    fn test_oscillating() {
        // MA5 < MA10 but MA10 > MA20
        assert_eq!(classify_trend(ma([8.0, 9.0, 8.5, 8.0])), Trend::Oscillating);
        // Equal averages fall through every strict comparison
        assert_eq!(classify_trend(ma([8.0, 8.0, 8.0, 8.0])), Trend::Oscillating);
    }

    #[test]
    fn test_missing_average_is_insufficient() {
        let trend = classify_trend([Some(10.0), Some(9.0), Some(8.0), None]);
        assert_eq!(trend, Trend::InsufficientData);
        assert_eq!(trend.strength(), None);
    }
}
