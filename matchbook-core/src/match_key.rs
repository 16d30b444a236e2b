//! Canonical match identity.
//!
//! Every ingestion run derives the same key for the same real-world match,
//! which makes the store's uniqueness constraint sufficient for
//! deduplication without a lookup pass.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Deterministic string key identifying a unique match across repeated
/// ingestion runs. Format: `{tournament}_{playerA}_{playerB}_{YYYY-MM-DD}`.
/// Tournament and player segments have every character outside
/// `[A-Za-z0-9_]` replaced by `_`; the ISO date keeps its hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchKey(String);

impl MatchKey {
    /// Resolve the canonical key for a match.
    ///
    /// Player names are normalized (nationality annotations and surrounding
    /// whitespace stripped) and ordered lexicographically, so the same
    /// pairing reported with players swapped yields the same key.
    /// `match_date` defaults to today when absent.
    pub fn resolve(
        tournament: &str,
        player1: &str,
        player2: &str,
        match_date: Option<NaiveDate>,
    ) -> Self {
        let a = normalize_player(player1);
        let b = normalize_player(player2);
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let date = match_date.unwrap_or_else(|| chrono::Utc::now().date_naive());
        Self(format!(
            "{}_{}_{}_{}",
            sanitize(tournament.trim()),
            sanitize(&first),
            sanitize(&second),
            date.format("%Y-%m-%d"),
        ))
    }

    /// The raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<MatchKey> for String {
    fn from(key: MatchKey) -> Self {
        key.0
    }
}

impl From<String> for MatchKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Strip a trailing parenthetical nationality annotation and whitespace.
/// `"Alcaraz C. (ESP)"` becomes `"Alcaraz C."`.
fn normalize_player(name: &str) -> String {
    let trimmed = name.trim();
    let without_annotation = match trimmed.find('(') {
        Some(idx) => trimmed[..idx].trim_end(),
        None => trimmed,
    };
    without_annotation.to_string()
}

/// Map every character outside `[A-Za-z0-9_]` to `_`.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn resolves_expected_format() {
        let key = MatchKey::resolve("Wimbledon", "Alice", "Bob", Some(date("2024-07-01")));
        assert_eq!(key.as_str(), "Wimbledon_Alice_Bob_2024-07-01");
    }

    #[test]
    fn strips_nationality_annotations() {
        let key = MatchKey::resolve(
            "ATP Madrid",
            "Alcaraz C. (ESP)",
            "Sinner J. (ITA)",
            Some(date("2024-05-01")),
        );
        assert!(!key.as_str().contains("ESP"));
        assert!(!key.as_str().contains("ITA"));
    }

    #[test]
    fn swapped_player_order_yields_same_key() {
        let d = Some(date("2024-07-01"));
        let ab = MatchKey::resolve("Wimbledon", "Alice", "Bob", d);
        let ba = MatchKey::resolve("Wimbledon", "Bob", "Alice", d);
        assert_eq!(ab, ba);
    }

    #[test]
    fn sanitizes_name_segments() {
        let key = MatchKey::resolve(
            "Roland-Garros '24",
            "O'Brien",
            "Smith",
            Some(date("2024-06-02")),
        );
        assert_eq!(key.as_str(), "Roland_Garros__24_O_Brien_Smith_2024-06-02");
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let d = Some(date("2024-07-01"));
        let first = MatchKey::resolve("Wimbledon", "Alice", "Bob", d);
        let second = MatchKey::resolve("Wimbledon", "Alice", "Bob", d);
        assert_eq!(first, second);
    }
}
