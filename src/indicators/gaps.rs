use serde::{Deserialize, Serialize};

use crate::models::{Bar, GapEvent, GapKind};

/// Up and down gaps found in a bar series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub up_gaps: Vec<GapEvent>,
    pub down_gaps: Vec<GapEvent>,
    pub has_gaps: bool,
}

/// Detect price gaps between consecutive bars (oldest first)
///
/// For each pair the earlier bar is the reference and the later bar is "today":
/// - Up gap: today's low is above the reference high (acts as support)
/// - Down gap: today's high is below the reference low (acts as resistance)
///
/// A pair yields at most one gap. Events are listed oldest pair first.
pub fn detect_gaps(bars: &[Bar]) -> GapAnalysis {
    let mut up_gaps = Vec::new();
    let mut down_gaps = Vec::new();

    for pair in bars.windows(2) {
        let (reference, today) = (&pair[0], &pair[1]);

        if today.low > reference.high {
            let size = today.low - reference.high;
            up_gaps.push(GapEvent {
                kind: GapKind::Up,
                date: today.date,
                reference_date: reference.date,
                price_range: [reference.high, today.low],
                size,
                pct: percent_of(size, reference.high),
                role: GapKind::Up.role(),
            });
        } else if today.high < reference.low {
            let size = reference.low - today.high;
            down_gaps.push(GapEvent {
                kind: GapKind::Down,
                date: today.date,
                reference_date: reference.date,
                price_range: [today.high, reference.low],
                size,
                pct: percent_of(size, reference.low),
                role: GapKind::Down.role(),
            });
        }
    }

    let has_gaps = !up_gaps.is_empty() || !down_gaps.is_empty();
    GapAnalysis {
        up_gaps,
        down_gaps,
        has_gaps,
    }
}

/// `size` as a percentage of `base`; 0.0 when `base` is not positive
fn percent_of(size: f64, base: f64) -> f64 {
    if base > 0.0 {
        size / base * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GapRole;
    use chrono::{Duration, NaiveDate};

    fn create_test_bars(ranges: &[(f64, f64)]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        ranges
            .iter()
            .enumerate()
            .map(|(i, &(high, low))| {
                Bar::new(start + Duration::days(i as i64), low, high, low, high, 500.0)
            })
            .collect()
    }

    #[test]
    fn test_single_up_gap() {
        let bars = create_test_bars(&[(100.0, 95.0), (110.0, 105.0)]);
        let gaps = detect_gaps(&bars);

        assert!(gaps.has_gaps);
        assert!(gaps.down_gaps.is_empty());
        assert_eq!(gaps.up_gaps.len(), 1);

        let gap = &gaps.up_gaps[0];
        assert_eq!(gap.kind, GapKind::Up);
        assert_eq!(gap.size, 5.0);
        assert_eq!(gap.pct, 5.0);
        assert_eq!(gap.role, GapRole::Support);
        assert_eq!(gap.price_range, [100.0, 105.0]);
        assert_eq!(gap.date, bars[1].date);
        assert_eq!(gap.reference_date, bars[0].date);
    }

    #[test]
    fn test_single_down_gap() {
        let bars = create_test_bars(&[(110.0, 100.0), (98.0, 90.0)]);
        let gaps = detect_gaps(&bars);

        assert!(gaps.up_gaps.is_empty());
        assert_eq!(gaps.down_gaps.len(), 1);

        let gap = &gaps.down_gaps[0];
        assert_eq!(gap.size, 2.0);
        assert_eq!(gap.pct, 2.0);
        assert_eq!(gap.role, GapRole::Resistance);
        assert_eq!(gap.price_range, [98.0, 100.0]);
    }

    #[test]
    fn test_touching_ranges_are_not_gaps() {
        let bars = create_test_bars(&[(100.0, 95.0), (104.0, 100.0), (100.0, 96.0)]);
        let gaps = detect_gaps(&bars);

        assert!(!gaps.has_gaps);
    }

    #[test]
    fn test_multiple_gaps_in_scan_order() {
        let bars = create_test_bars(&[
            (10.0, 9.0),
            (12.0, 11.0), // Up
            (12.5, 11.5),
            (11.0, 10.0), // Down
            (13.0, 12.0), // Up
        ]);
        let gaps = detect_gaps(&bars);

        assert_eq!(gaps.up_gaps.len(), 2);
        assert_eq!(gaps.down_gaps.len(), 1);
        assert_eq!(gaps.up_gaps[0].date, bars[1].date);
        assert_eq!(gaps.up_gaps[1].date, bars[4].date);
        assert_eq!(gaps.down_gaps[0].date, bars[3].date);
    }

    #[test]
    fn test_gap_above_zero_priced_bar_has_finite_pct() {
        let bars = create_test_bars(&[(0.0, 0.0), (1.2, 1.0)]);
        let gaps = detect_gaps(&bars);

        assert_eq!(gaps.up_gaps.len(), 1);
        let gap = &gaps.up_gaps[0];
        assert_eq!(gap.size, 1.0);
        assert_eq!(gap.pct, 0.0);

        let json = serde_json::to_string(&gaps).unwrap();
        let restored: GapAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, gaps);
    }

    #[test]
    fn test_fewer_than_two_bars() {
        assert_eq!(detect_gaps(&[]), GapAnalysis::default());

        let bars = create_test_bars(&[(10.0, 9.0)]);
        assert!(!detect_gaps(&bars).has_gaps);
    }
}
