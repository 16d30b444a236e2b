use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Coarse classification derived from a numeric confidence score.
/// High >= 70, Medium 50..=69 (both bounds inclusive), Low < 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBucket {
    High,
    Medium,
    Low,
}

impl ConfidenceBucket {
    /// Bucket a confidence score using the fixed thresholds.
    pub fn from_score(score: u8) -> Self {
        if score >= constants::BUCKET_HIGH_MIN {
            Self::High
        } else if score >= constants::BUCKET_MEDIUM_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Stable string form, used in storage and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse the stable string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for ConfidenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
