//! Stock data files and the analysis document written back out
//!
//! Reads the JSON layout produced by the quote fetcher
//! (`stock_code`, `fetch_time`, `real_time`, `historical`) and wraps a
//! finished [`AnalysisReport`] with the metadata needed to publish it.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::models::Bar;
use crate::report::{analyze, round_to, AnalysisReport};
use crate::Result;

/// Real-time quote snapshot; any field may be missing from the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealTimeQuote {
    pub name: String,
    pub open: Option<f64>,
    pub pre_close: Option<f64>,
    pub current: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<f64>,
    pub amount: Option<f64>,
    pub date: String,
    pub time: String,
}

/// Change of the current price against the previous close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub current: f64,
    pub pre_close: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl RealTimeQuote {
    pub fn change(&self) -> Option<PriceChange> {
        let current = self.current?;
        let pre_close = self.pre_close?;
        if pre_close <= 0.0 {
            return None;
        }

        let change = current - pre_close;
        Some(PriceChange {
            current,
            pre_close,
            change,
            change_percent: change / pre_close * 100.0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDataFile {
    #[serde(default)]
    pub stock_code: String,
    #[serde(default)]
    pub fetch_time: String,
    #[serde(default)]
    pub real_time: Option<RealTimeQuote>,
    #[serde(default)]
    pub historical: Vec<Bar>,
}

impl StockDataFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let data = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            stock_code = %data.stock_code,
            bars = data.historical.len(),
            "loaded stock data file"
        );
        Ok(data)
    }

    /// Historical bars, oldest first
    ///
    /// Feeds that list the newest bar first are reversed.
    pub fn bars(&self) -> Vec<Bar> {
        let mut bars = self.historical.clone();
        let newest_first = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => first.date > last.date,
            _ => false,
        };

        if newest_first {
            tracing::debug!(stock_code = %self.stock_code, "historical bars are newest first, reversing");
            bars.reverse();
        }

        bars
    }

    /// Current price from the real-time quote, if one was fetched
    pub fn quoted_price(&self) -> Option<f64> {
        self.real_time.as_ref().and_then(|quote| quote.current)
    }

    /// Analyze this file's bars
    ///
    /// Price precedence: `price_override`, then the real-time quote, then the latest close.
    pub fn analyze(
        &self,
        price_override: Option<f64>,
        config: &AnalysisConfig,
    ) -> Result<AnalysisDocument> {
        let bars = self.bars();
        let report = analyze(&bars, price_override.or(self.quoted_price()), config)?;

        Ok(AnalysisDocument {
            stock_code: self.stock_code.clone(),
            stock_name: self
                .real_time
                .as_ref()
                .map(|quote| quote.name.clone())
                .unwrap_or_default(),
            analysis_time: self.fetch_time.clone(),
            generated_at: Utc::now(),
            price_change: self.real_time.as_ref().and_then(RealTimeQuote::change).map(|c| {
                PriceChange {
                    change: round_to(c.change, 2),
                    change_percent: round_to(c.change_percent, 2),
                    ..c
                }
            }),
            report,
        })
    }
}

/// Published analysis: the report plus who/when metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub stock_code: String,
    pub stock_name: String,
    /// When the underlying data was fetched
    pub analysis_time: String,
    pub generated_at: DateTime<Utc>,
    pub price_change: Option<PriceChange>,
    pub report: AnalysisReport,
}

impl AnalysisDocument {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), "analysis written");
        Ok(())
    }
}
