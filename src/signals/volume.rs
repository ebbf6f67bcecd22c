use serde::{Deserialize, Serialize};

use crate::config::VolumeParams;
use crate::indicators::volume_ratio;
use crate::models::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeLevel {
    InsufficientData,
    SharpIncrease,
    ModerateIncrease,
    SharpDecrease,
    Normal,
}

impl VolumeLevel {
    pub fn label(self) -> &'static str {
        match self {
            VolumeLevel::InsufficientData => "insufficient data",
            VolumeLevel::SharpIncrease => "volume surge",
            VolumeLevel::ModerateIncrease => "moderate volume increase",
            VolumeLevel::SharpDecrease => "volume dried up",
            VolumeLevel::Normal => "normal",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VolumeLevel::InsufficientData => "no volume to analyze",
            VolumeLevel::SharpIncrease => "volume expanded sharply",
            VolumeLevel::ModerateIncrease => "volume expanded moderately",
            VolumeLevel::SharpDecrease => "volume contracted sharply",
            VolumeLevel::Normal => "volume is normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAnalysis {
    /// Latest volume over the trailing average
    pub ratio: Option<f64>,
    pub level: VolumeLevel,
}

/// Compare the latest volume with the trailing `params.lookback` average
pub fn classify_volume(bars: &[Bar], params: &VolumeParams) -> VolumeAnalysis {
    let Some(ratio) = volume_ratio(bars, params.lookback) else {
        return VolumeAnalysis {
            ratio: None,
            level: VolumeLevel::InsufficientData,
        };
    };

    let level = if ratio >= params.sharp_increase {
        VolumeLevel::SharpIncrease
    } else if ratio >= params.moderate_increase {
        VolumeLevel::ModerateIncrease
    } else if ratio <= params.sharp_decrease {
        VolumeLevel::SharpDecrease
    } else {
        VolumeLevel::Normal
    };

    VolumeAnalysis {
        ratio: Some(ratio),
        level,
    }
}
