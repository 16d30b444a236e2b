/// Matchbook system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Confidence score above which a prediction buckets as `high`.
pub const BUCKET_HIGH_MIN: u8 = 70;

/// Confidence score above which a prediction buckets as `medium`.
/// Scores in `50..=69` are medium; below 50 is low.
pub const BUCKET_MEDIUM_MIN: u8 = 50;

/// Last day (inclusive) of the collection phase.
pub const COLLECTION_PHASE_LAST_DAY: u32 = 7;

/// Last day (inclusive) of the pattern-recognition phase.
pub const PATTERN_PHASE_LAST_DAY: u32 = 21;

/// Confidence ceiling while in the collection phase.
pub const COLLECTION_MAX_CONFIDENCE: u8 = 60;

/// Confidence ceiling while in the pattern-recognition phase.
pub const PATTERN_MAX_CONFIDENCE: u8 = 75;

/// Confidence ceiling once the system is mature.
pub const MATURE_MAX_CONFIDENCE: u8 = 100;

/// Default page size for prediction listings.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Hard upper bound on page size.
pub const MAX_PAGE_SIZE: u32 = 200;
