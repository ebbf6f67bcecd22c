use serde::{Deserialize, Serialize};

use crate::config::RsiParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    InsufficientData,
    SevereOverbought,
    Overbought,
    SevereOversold,
    Oversold,
    Normal,
}

impl RsiZone {
    pub fn label(self) -> &'static str {
        match self {
            RsiZone::InsufficientData => "insufficient data",
            RsiZone::SevereOverbought => "severely overbought",
            RsiZone::Overbought => "overbought",
            RsiZone::SevereOversold => "severely oversold",
            RsiZone::Oversold => "oversold",
            RsiZone::Normal => "normal",
        }
    }
}

/// RSI reading with its band and a human-readable note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiAnalysis {
    pub value: Option<f64>,
    pub zone: RsiZone,
    pub description: String,
}

/// Place the latest RSI in a band, checking from the top band down
pub fn classify_rsi(latest: Option<f64>, bands: &RsiParams) -> RsiAnalysis {
    let Some(rsi) = latest else {
        return RsiAnalysis {
            value: None,
            zone: RsiZone::InsufficientData,
            description: "not enough history to judge RSI".to_string(),
        };
    };

    let (zone, note) = if rsi >= bands.severe_overbought {
        (RsiZone::SevereOverbought, "severely overbought, high pullback risk")
    } else if rsi >= bands.overbought {
        (RsiZone::Overbought, "overbought, watch for a pullback")
    } else if rsi <= bands.severe_oversold {
        (RsiZone::SevereOversold, "severely oversold, a rebound is possible")
    } else if rsi <= bands.oversold {
        (RsiZone::Oversold, "oversold, may rebound")
    } else {
        (RsiZone::Normal, "within the normal range")
    };

    RsiAnalysis {
        value: Some(rsi),
        zone,
        description: format!("RSI={:.2}, {}", rsi, note),
    }
}
