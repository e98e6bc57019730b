//! Strongly-typed wrappers for card identifiers
//!
//! Collector numbers arrive as integers from deck builders and as zero-padded
//! strings from card exports ("087", "TG05", " 12 "). Wrapping them in a
//! newtype that normalizes on construction means a lookup key can never be
//! built from a raw, un-normalized string by accident.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Normalized collector number within a set
///
/// Whitespace is trimmed. All-digit numbers drop their leading zeros
/// ("087" -> "87", "000" -> "0"); anything else keeps its trimmed literal
/// form ("TG05" stays "TG05").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn new(raw: impl AsRef<str>) -> Self {
        CardNumber(normalize_card_number(raw.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Collapse a raw collector number to its lookup form
pub fn normalize_card_number(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = trimmed.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardNumber {
    fn from(s: &str) -> Self {
        CardNumber::new(s)
    }
}

impl From<String> for CardNumber {
    fn from(s: String) -> Self {
        CardNumber::new(s)
    }
}

impl From<u32> for CardNumber {
    fn from(n: u32) -> Self {
        CardNumber(n.to_string())
    }
}

// Deck builders emit numbers as JSON integers, card exports as strings.
impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawNumber {
            Int(u64),
            Text(String),
        }

        Ok(match RawNumber::deserialize(deserializer)? {
            RawNumber::Int(n) => CardNumber(n.to_string()),
            RawNumber::Text(s) => CardNumber::new(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_numbers_drop_leading_zeros() {
        assert_eq!(normalize_card_number("087"), "87");
        assert_eq!(normalize_card_number("87"), "87");
        assert_eq!(normalize_card_number("000"), "0");
        assert_eq!(normalize_card_number(" 012 "), "12");
    }

    #[test]
    fn test_non_numeric_numbers_keep_literal_form() {
        assert_eq!(normalize_card_number(" TG05 "), "TG05");
        assert_eq!(normalize_card_number("SWSH001"), "SWSH001");
        assert_eq!(normalize_card_number("GG01a"), "GG01a");
        assert_eq!(normalize_card_number(""), "");
    }

    #[test]
    fn test_deserialize_int_or_string() {
        let from_int: CardNumber = serde_json::from_str("87").unwrap();
        let from_str: CardNumber = serde_json::from_str("\"087\"").unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(from_int.as_str(), "87");
    }
}
