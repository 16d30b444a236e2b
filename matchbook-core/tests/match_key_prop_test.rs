//! Property tests: the match identity resolver is pure and deterministic.

use chrono::NaiveDate;
use matchbook_core::MatchKey;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_resolve_is_deterministic(
        tournament in "[a-zA-Z0-9 '-]{1,30}",
        p1 in "[a-zA-Z .]{1,20}",
        p2 in "[a-zA-Z .]{1,20}",
        day in 1u32..28,
        month in 1u32..13,
    ) {
        let date = NaiveDate::from_ymd_opt(2024, month, day).unwrap();
        let first = MatchKey::resolve(&tournament, &p1, &p2, Some(date));
        let second = MatchKey::resolve(&tournament, &p1, &p2, Some(date));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_resolve_is_order_insensitive(
        tournament in "[a-zA-Z0-9 ]{1,30}",
        p1 in "[a-zA-Z .]{1,20}",
        p2 in "[a-zA-Z .]{1,20}",
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let ab = MatchKey::resolve(&tournament, &p1, &p2, Some(date));
        let ba = MatchKey::resolve(&tournament, &p2, &p1, Some(date));
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn prop_resolved_keys_are_sanitized(
        tournament in ".{1,30}",
        p1 in ".{1,20}",
        p2 in ".{1,20}",
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let key = MatchKey::resolve(&tournament, &p1, &p2, Some(date));
        prop_assert!(key
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }
}
