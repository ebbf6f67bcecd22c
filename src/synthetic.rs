use crate::models::Bar;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Market scenario types for synthetic data generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketScenario {
    /// Steady uptrend with noise (+0.5% daily average)
    Uptrend,
    /// Steady downtrend with noise (-0.5% daily average)
    Downtrend,
    /// Sideways/choppy market (±1% around mean)
    Sideways,
    /// High volatility (±5% large swings)
    Volatile,
    /// Random walk with a price gap every 15 bars, alternating up and down
    Gapped,
}

/// Days between forced gaps in [`MarketScenario::Gapped`]
const GAP_EVERY: usize = 15;

/// Generates synthetic daily OHLCV bars
pub struct SyntheticBarGenerator {
    rng: StdRng,
    base_price: f64,
    base_volume: f64,
    start_date: NaiveDate,
}

impl SyntheticBarGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 50.0,
            base_volume: 2_000_000.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    /// Generate `num_bars` consecutive daily bars, oldest first
    pub fn generate(&mut self, scenario: MarketScenario, num_bars: usize) -> Vec<Bar> {
        let mut bars = Vec::with_capacity(num_bars);
        let mut price = self.base_price;

        for i in 0..num_bars {
            price = match scenario {
                MarketScenario::Uptrend => self.trend_step(price, 0.005),
                MarketScenario::Downtrend => self.trend_step(price, -0.005),
                MarketScenario::Sideways => {
                    // Mean reversion force + noise
                    let reversion = (self.base_price - price) * 0.1;
                    price + reversion + price * self.rng.gen_range(-0.01..0.01)
                }
                MarketScenario::Volatile => {
                    let next = price + price * self.rng.gen_range(-0.05..0.05);
                    // Prevent price from going too low
                    next.max(self.base_price * 0.5)
                }
                MarketScenario::Gapped => {
                    if i > 0 && i % GAP_EVERY == 0 {
                        // Jump well past the ±1% intrabar range so the ranges cannot overlap
                        let up = (i / GAP_EVERY) % 2 == 1;
                        if up {
                            price * 1.05
                        } else {
                            price * 0.95
                        }
                    } else {
                        price + price * self.rng.gen_range(-0.01..0.01)
                    }
                }
            };

            let date = self.start_date + Duration::days(i as i64);
            bars.push(self.create_bar(price, date));
        }

        bars
    }

    fn trend_step(&mut self, price: f64, drift: f64) -> f64 {
        let noise = price * self.rng.gen_range(-0.01..0.01);
        price + price * drift + noise
    }

    /// Helper to create a bar from close price and date
    fn create_bar(&mut self, close: f64, date: NaiveDate) -> Bar {
        let range_pct = 0.01; // up to ±1% intraday movement

        let high = close * (1.0 + self.rng.gen_range(0.0..range_pct));
        let low = close * (1.0 - self.rng.gen_range(0.0..range_pct));

        // Generate open and clamp it between low and high
        let open_raw = close * (1.0 + self.rng.gen_range(-range_pct..range_pct));
        let open = open_raw.clamp(low, high);

        // Vary volume ±30%
        let volume = self.base_volume * self.rng.gen_range(0.7..1.3);

        Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::detect_gaps;
    use crate::validation::{validate_series, BarValidator};

    #[test]
    fn test_generate_uptrend() {
        let mut gen = SyntheticBarGenerator::new(42);
        let bars = gen.generate(MarketScenario::Uptrend, 120);

        assert_eq!(bars.len(), 120);

        let first_price = bars.first().unwrap().close;
        let last_price = bars.last().unwrap().close;
        assert!(
            last_price > first_price,
            "Uptrend should end higher: {} -> {}",
            first_price,
            last_price
        );
    }

    #[test]
    fn test_generate_downtrend() {
        let mut gen = SyntheticBarGenerator::new(42);
        let bars = gen.generate(MarketScenario::Downtrend, 120);

        let first_price = bars.first().unwrap().close;
        let last_price = bars.last().unwrap().close;
        assert!(
            last_price < first_price,
            "Downtrend should end lower: {} -> {}",
            first_price,
            last_price
        );
    }

    #[test]
    fn test_generate_sideways() {
        let mut gen = SyntheticBarGenerator::new(42);
        let bars = gen.generate(MarketScenario::Sideways, 250);

        // Should stay roughly around base price (±10%)
        let base = gen.base_price;
        for bar in &bars {
            assert!(
                bar.close > base * 0.9 && bar.close < base * 1.1,
                "Sideways should stay near base: {} vs {}",
                bar.close,
                base
            );
        }
    }

    #[test]
    fn test_gapped_series_has_alternating_gaps() {
        let mut gen = SyntheticBarGenerator::new(7);
        let bars = gen.generate(MarketScenario::Gapped, 61);
        let gaps = detect_gaps(&bars);

        // Forced gaps at bars 15 (up), 30 (down), 45 (up), 60 (down)
        let forced_up = gaps.up_gaps.iter().filter(|g| g.date == bars[15].date || g.date == bars[45].date);
        let forced_down = gaps.down_gaps.iter().filter(|g| g.date == bars[30].date || g.date == bars[60].date);
        assert_eq!(forced_up.count(), 2);
        assert_eq!(forced_down.count(), 2);
    }

    #[test]
    fn test_same_seed_same_bars() {
        let a = SyntheticBarGenerator::new(9).generate(MarketScenario::Volatile, 50);
        let b = SyntheticBarGenerator::new(9).generate(MarketScenario::Volatile, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bars_pass_validation() {
        for scenario in [
            MarketScenario::Uptrend,
            MarketScenario::Downtrend,
            MarketScenario::Sideways,
            MarketScenario::Volatile,
            MarketScenario::Gapped,
        ] {
            let bars = SyntheticBarGenerator::new(42).generate(scenario, 100);
            assert!(validate_series(&bars).is_ok());
            assert!(BarValidator::new().validate_all(&bars).is_ok(), "{:?}", scenario);
        }
    }

    #[test]
    fn test_dates_are_consecutive() {
        let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let bars = SyntheticBarGenerator::new(1)
            .with_start_date(start)
            .generate(MarketScenario::Uptrend, 10);

        assert_eq!(bars[0].date, start);
        for pair in bars.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }
}
