// Signal classifiers
// Turn indicator values into trend, MACD, RSI and volume labels
pub mod macd;
pub mod rsi;
pub mod trend;
pub mod volume;

pub use macd::{classify_macd, MacdSignal};
pub use rsi::{classify_rsi, RsiAnalysis, RsiZone};
pub use trend::{classify_trend, Strength, Trend};
pub use volume::{classify_volume, VolumeAnalysis, VolumeLevel};
