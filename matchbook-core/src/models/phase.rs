use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Ordered system-maturity stage. Bounds the maximum confidence score a new
/// prediction may carry. Derived purely from days operated, with no
/// hysteresis; it never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningPhase {
    Collection,
    PatternRecognition,
    Mature,
}

impl LearningPhase {
    /// The phase for a given number of days operated.
    pub fn for_days(days_operated: u32) -> Self {
        if days_operated <= constants::COLLECTION_PHASE_LAST_DAY {
            Self::Collection
        } else if days_operated <= constants::PATTERN_PHASE_LAST_DAY {
            Self::PatternRecognition
        } else {
            Self::Mature
        }
    }

    /// The confidence ceiling for this phase.
    pub fn max_confidence(self) -> u8 {
        match self {
            Self::Collection => constants::COLLECTION_MAX_CONFIDENCE,
            Self::PatternRecognition => constants::PATTERN_MAX_CONFIDENCE,
            Self::Mature => constants::MATURE_MAX_CONFIDENCE,
        }
    }

    /// Stable string form, used in storage and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::PatternRecognition => "pattern_recognition",
            Self::Mature => "mature",
        }
    }

    /// Parse the stable string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "collection" => Some(Self::Collection),
            "pattern_recognition" => Some(Self::PatternRecognition),
            "mature" => Some(Self::Mature),
            _ => None,
        }
    }
}

impl fmt::Display for LearningPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_boundaries() {
        assert_eq!(LearningPhase::for_days(0), LearningPhase::Collection);
        assert_eq!(LearningPhase::for_days(7), LearningPhase::Collection);
        assert_eq!(LearningPhase::for_days(8), LearningPhase::PatternRecognition);
        assert_eq!(LearningPhase::for_days(21), LearningPhase::PatternRecognition);
        assert_eq!(LearningPhase::for_days(22), LearningPhase::Mature);
        assert_eq!(LearningPhase::for_days(365), LearningPhase::Mature);
    }

    #[test]
    fn ceilings() {
        assert_eq!(LearningPhase::Collection.max_confidence(), 60);
        assert_eq!(LearningPhase::PatternRecognition.max_confidence(), 75);
        assert_eq!(LearningPhase::Mature.max_confidence(), 100);
    }

    #[test]
    fn phases_are_ordered() {
        assert!(LearningPhase::Collection < LearningPhase::PatternRecognition);
        assert!(LearningPhase::PatternRecognition < LearningPhase::Mature);
    }

    #[test]
    fn string_roundtrip() {
        for phase in [
            LearningPhase::Collection,
            LearningPhase::PatternRecognition,
            LearningPhase::Mature,
        ] {
            assert_eq!(LearningPhase::parse(phase.as_str()), Some(phase));
        }
        assert_eq!(LearningPhase::parse("unknown"), None);
    }
}
