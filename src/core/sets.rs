//! Set display names and set codes
//!
//! Banned-card announcements name sets by their printed title ("Paldean
//! Fates"), while card exports key everything by set code ("PAF").

use crate::{DeckcheckError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Promo sets are missing from the set index they are scraped from
const PROMO_SET: (&str, &str) = ("black star promo", "SMP");

/// Lower-cased display name -> set code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, String>", into = "IndexMap<String, String>")]
pub struct SetCodes {
    codes: IndexMap<String, String>,
}

impl SetCodes {
    pub fn new() -> Self {
        let mut codes = IndexMap::new();
        codes.insert(PROMO_SET.0.to_string(), PROMO_SET.1.to_string());
        SetCodes { codes }
    }

    /// Load a `{"display name": "CODE"}` mapping
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            DeckcheckError::InvalidInput(format!(
                "Error loading set codes from {}: {e}",
                path.display()
            ))
        })
    }

    pub fn insert(&mut self, display_name: &str, code: impl Into<String>) {
        self.codes.insert(display_name.to_lowercase(), code.into());
    }

    /// Resolve a display name; unmapped names are assumed to already be codes
    pub fn resolve<'a>(&'a self, display_name: &'a str) -> &'a str {
        self.codes
            .get(&display_name.to_lowercase())
            .map(String::as_str)
            .unwrap_or(display_name)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for SetCodes {
    fn default() -> Self {
        Self::new()
    }
}

impl From<IndexMap<String, String>> for SetCodes {
    fn from(map: IndexMap<String, String>) -> Self {
        let mut codes = SetCodes::new();
        for (name, code) in map {
            codes.insert(&name, code);
        }
        codes
    }
}

impl From<SetCodes> for IndexMap<String, String> {
    fn from(codes: SetCodes) -> Self {
        codes.codes
    }
}
