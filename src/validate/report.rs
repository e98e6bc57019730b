//! Checking one decklist against several formats
//!
//! The same deck is usually checked for standard and expanded at once, each
//! with its own pool and banned list. Results are stored next to saved
//! decks as `{"standard": {"valid": true, "error": ""}, ...}`.

use crate::core::{Decklist, Format};
use crate::loader::{BannedCards, LegalCardPool};
use crate::validate::{validate, Verdict};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reference data for one format
#[derive(Debug, Clone)]
pub struct FormatRules {
    pub format: Format,
    pub legal: Option<LegalCardPool>,
    pub banned: Option<BannedCards>,
}

impl FormatRules {
    pub fn new(format: Format) -> Self {
        FormatRules {
            format,
            legal: None,
            banned: None,
        }
    }

    pub fn with_legal(mut self, legal: LegalCardPool) -> Self {
        self.legal = Some(legal);
        self
    }

    pub fn with_banned(mut self, banned: BannedCards) -> Self {
        self.banned = Some(banned);
        self
    }

    pub fn check(&self, deck: &Decklist) -> Verdict {
        validate(deck, self.legal.as_ref(), self.banned.as_ref())
    }
}

/// Stored result of one format check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatResult {
    pub valid: bool,
    pub error: String,
}

impl From<&Verdict> for FormatResult {
    fn from(verdict: &Verdict) -> Self {
        FormatResult {
            valid: verdict.is_legal(),
            error: verdict.reason(),
        }
    }
}

/// Results per format, in the order the formats were checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatReport {
    pub results: IndexMap<Format, FormatResult>,
}

impl FormatReport {
    pub fn get(&self, format: Format) -> Option<&FormatResult> {
        self.results.get(&format)
    }

    /// Whether the deck passed every checked format
    pub fn all_valid(&self) -> bool {
        self.results.values().all(|result| result.valid)
    }
}

/// Check a decklist against each format's rules
pub fn check_formats(deck: &Decklist, formats: &[FormatRules]) -> FormatReport {
    let results = formats
        .iter()
        .map(|rules| (rules.format, FormatResult::from(&rules.check(deck))))
        .collect();
    FormatReport { results }
}
