// Technical indicators module
// Implements SMA, EMA, MACD, RSI, support/resistance, gaps and volume ratio

pub mod gaps;
pub mod levels;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod volume;

pub use gaps::{detect_gaps, GapAnalysis};
pub use levels::{find_support_resistance, SupportResistance};
pub use macd::{calculate_macd, MacdSeries};
pub use moving_average::{ema, latest_sma, sma};
pub use rsi::calculate_rsi;
pub use volume::{average_volume, volume_ratio};
