use thiserror::Error;

/// Errors raised while ingesting bars or running an analysis.
///
/// Insufficient history for a single indicator is not an error: it shows up
/// as `None` in that indicator's series and as an "insufficient data" label.
#[derive(Error, Debug)]
pub enum AnalysisError {
    // -- Ingestion ------------------------------------------------------------
    #[error("no bars to analyze")]
    EmptySeries,

    #[error("bar {index}: {field} is not a finite number ({value})")]
    InvalidBar {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("bar {index} is dated before the bar preceding it (bars must be oldest first)")]
    Unordered { index: usize },

    #[error("current price is not a finite number ({0})")]
    InvalidPrice(f64),

    #[error("bar {index} failed strict validation: {reason}")]
    Strict { index: usize, reason: String },

    // -- Configuration --------------------------------------------------------
    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    // -- Forwarded ------------------------------------------------------------
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
