use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::Result;

/// Prefix for environment overrides, e.g. `STOCKTA__RSI__PERIOD=21`
pub const ENV_PREFIX: &str = "STOCKTA";

/// Moving-average windows used by the trend classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaPeriods {
    pub fast: usize,
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

impl Default for SmaPeriods {
    fn default() -> Self {
        Self {
            fast: 5,
            short: 10,
            medium: 20,
            long: 60,
        }
    }
}

impl SmaPeriods {
    pub fn as_array(&self) -> [usize; 4] {
        [self.fast, self.short, self.medium, self.long]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// RSI period plus the four classification bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
    pub severe_overbought: f64,
    pub overbought: f64,
    pub oversold: f64,
    pub severe_oversold: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: 14,
            severe_overbought: 80.0,
            overbought: 70.0,
            oversold: 30.0,
            severe_oversold: 20.0,
        }
    }
}

/// Support/resistance scan settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelParams {
    /// Bars on each side a local extremum must beat
    pub neighbor_window: usize,
    /// Levels kept per side
    pub max_levels: usize,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            neighbor_window: 2,
            max_levels: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeParams {
    pub lookback: usize,
    pub sharp_increase: f64,
    pub moderate_increase: f64,
    pub sharp_decrease: f64,
}

impl Default for VolumeParams {
    fn default() -> Self {
        Self {
            lookback: 5,
            sharp_increase: 2.0,
            moderate_increase: 1.5,
            sharp_decrease: 0.5,
        }
    }
}

/// Every tunable of the analysis engine in one place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sma: SmaPeriods,
    pub macd: MacdParams,
    pub rsi: RsiParams,
    pub levels: LevelParams,
    pub volume: VolumeParams,
}

impl AnalysisConfig {
    /// Load defaults, then an optional TOML/JSON file, then `STOCKTA__*` env overrides
    ///
    /// The merged result is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, env_overrides())
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder.add_source(env).build()?;

        let config: AnalysisConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(?config, "loaded analysis config");
        Ok(config)
    }

    /// Check periods and thresholds for values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        for (name, period) in [
            ("sma.fast", self.sma.fast),
            ("sma.short", self.sma.short),
            ("sma.medium", self.sma.medium),
            ("sma.long", self.sma.long),
            ("macd.fast", self.macd.fast),
            ("macd.slow", self.macd.slow),
            ("macd.signal", self.macd.signal),
            ("rsi.period", self.rsi.period),
            ("volume.lookback", self.volume.lookback),
        ] {
            if period == 0 {
                return Err(invalid(format!("{} must be at least 1", name)));
            }
        }

        if self.macd.fast >= self.macd.slow {
            return Err(invalid(format!(
                "macd.fast ({}) must be shorter than macd.slow ({})",
                self.macd.fast, self.macd.slow
            )));
        }

        let rsi = &self.rsi;
        let bands_ordered = rsi.severe_oversold < rsi.oversold
            && rsi.oversold < rsi.overbought
            && rsi.overbought < rsi.severe_overbought;
        let bands_in_range = rsi.severe_oversold >= 0.0 && rsi.severe_overbought <= 100.0;
        if !bands_ordered || !bands_in_range {
            return Err(invalid(format!(
                "rsi bands must satisfy 0 <= {} < {} < {} < {} <= 100",
                rsi.severe_oversold, rsi.oversold, rsi.overbought, rsi.severe_overbought
            )));
        }

        if self.levels.neighbor_window == 0 {
            return Err(invalid("levels.neighbor_window must be at least 1".to_string()));
        }
        if self.levels.max_levels == 0 {
            return Err(invalid("levels.max_levels must be at least 1".to_string()));
        }

        let volume = &self.volume;
        if !(volume.sharp_decrease < volume.moderate_increase
            && volume.moderate_increase <= volume.sharp_increase)
        {
            return Err(invalid(format!(
                "volume thresholds must satisfy {} < {} <= {}",
                volume.sharp_decrease, volume.moderate_increase, volume.sharp_increase
            )));
        }

        Ok(())
    }
}

fn env_overrides() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn invalid(message: String) -> AnalysisError {
    AnalysisError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();

        assert_eq!(config.sma.as_array(), [5, 10, 20, 60]);
        assert_eq!(config.macd, MacdParams { fast: 12, slow: 26, signal: 9 });
        assert_eq!(config.rsi.period, 14);
        assert_eq!(config.levels.neighbor_window, 2);
        assert_eq!(config.levels.max_levels, 3);
        assert_eq!(config.volume.lookback, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_period() {
        let mut config = AnalysisConfig::default();
        config.rsi.period = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rsi.period"));
    }

    #[test]
    fn test_rejects_inverted_macd() {
        let mut config = AnalysisConfig::default();
        config.macd.fast = 26;

        assert!(matches!(config.validate(), Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_unordered_rsi_bands() {
        let mut config = AnalysisConfig::default();
        config.rsi.oversold = 75.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[rsi]\nperiod = 21\n\n[levels]\nmax_levels = 5").unwrap();

        let config = AnalysisConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.rsi.period, 21);
        assert_eq!(config.rsi.overbought, 70.0);
        assert_eq!(config.levels.max_levels, 5);
        assert_eq!(config.macd, MacdParams::default());
    }

    #[test]
    fn test_invalid_file_values_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[macd]\nfast = 30\nslow = 26").unwrap();

        assert!(AnalysisConfig::load(Some(file.path())).is_err());
    }

    fn fake_env(vars: &[(&str, &str)]) -> config::Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        env_overrides().source(Some(map))
    }

    #[test]
    fn test_env_overrides_defaults() {
        let env = fake_env(&[("STOCKTA__MACD__SIGNAL", "7"), ("STOCKTA__RSI__OVERBOUGHT", "75.5")]);
        let config = AnalysisConfig::load_with_env(None, env).unwrap();

        assert_eq!(config.macd.signal, 7);
        assert_eq!(config.macd.fast, 12);
        assert_eq!(config.rsi.overbought, 75.5);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[rsi]\nperiod = 9\n\n[levels]\nmax_levels = 5").unwrap();

        let env = fake_env(&[("STOCKTA__RSI__PERIOD", "21"), ("OTHER__RSI__PERIOD", "3")]);
        let config = AnalysisConfig::load_with_env(Some(file.path()), env).unwrap();

        assert_eq!(config.rsi.period, 21);
        assert_eq!(config.levels.max_levels, 5);
    }

    #[test]
    fn test_invalid_env_value_is_rejected() {
        let env = fake_env(&[("STOCKTA__LEVELS__MAX_LEVELS", "0")]);
        assert!(matches!(
            AnalysisConfig::load_with_env(None, env),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = AnalysisConfig::load(Some(Path::new("/nonexistent/stockta.toml")));
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }
}
