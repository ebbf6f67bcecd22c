use crate::error::AnalysisError;
use crate::models::Bar;
use crate::Result;

/// Checks every analysis needs: bars present, numbers finite, dates oldest first
pub fn validate_series(bars: &[Bar]) -> Result<()> {
    if bars.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    for (index, bar) in bars.iter().enumerate() {
        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
            ("volume", bar.volume),
        ] {
            if !value.is_finite() {
                return Err(AnalysisError::InvalidBar {
                    index,
                    field,
                    value,
                });
            }
        }
    }

    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].date < pair[0].date {
            return Err(AnalysisError::Unordered { index: i + 1 });
        }
    }

    Ok(())
}

/// Validates OHLCV bars for sanity and correctness
///
/// Stricter than [`validate_series`]; opt-in for data whose source is not trusted.
pub struct BarValidator;

impl BarValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate every bar, reporting the first failure
    pub fn validate_all(&self, bars: &[Bar]) -> Result<()> {
        for (index, bar) in bars.iter().enumerate() {
            self.validate(bar)
                .map_err(|reason| AnalysisError::Strict { index, reason })?;
        }
        Ok(())
    }

    /// Validate a bar for correctness
    pub fn validate(&self, bar: &Bar) -> std::result::Result<(), String> {
        self.validate_prices(bar)?;
        self.validate_ohlc_relationship(bar)?;
        Ok(())
    }

    /// Validate that all prices are positive
    fn validate_prices(&self, bar: &Bar) -> std::result::Result<(), String> {
        for (name, price) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if price.is_nan() || price <= 0.0 {
                return Err(format!("Invalid {} price: {}", name, price));
            }
        }
        // Suspended trading days report zero volume
        if bar.volume.is_nan() || bar.volume < 0.0 {
            return Err(format!("Invalid volume: {}", bar.volume));
        }
        Ok(())
    }

    /// Validate OHLC relationships (high >= low, etc.)
    fn validate_ohlc_relationship(&self, bar: &Bar) -> std::result::Result<(), String> {
        if bar.high < bar.low {
            return Err(format!("High ({}) is less than low ({})", bar.high, bar.low));
        }
        if bar.high < bar.open {
            return Err(format!("High ({}) is less than open ({})", bar.high, bar.open));
        }
        if bar.high < bar.close {
            return Err(format!("High ({}) is less than close ({})", bar.high, bar.close));
        }
        if bar.low > bar.open {
            return Err(format!("Low ({}) is greater than open ({})", bar.low, bar.open));
        }
        if bar.low > bar.close {
            return Err(format!("Low ({}) is greater than close ({})", bar.low, bar.close));
        }
        Ok(())
    }
}

impl Default for BarValidator {
    fn default() -> Self {
        Self::new()
    }
}
