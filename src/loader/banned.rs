//! Banned card lists
//!
//! Ban announcements list cards as `(name, set display name, number)`. The
//! validator wants them keyed the way the legality exports are: Pokémon by
//! set code and number, Trainers and Energies by name. Converting needs the
//! expanded export to tell the three apart, and any reference that can't be
//! resolved there is fatal: a silently dropped ban would let a banned card
//! through every check.

use crate::core::{CardCategory, CardNumber, SetCodes};
use crate::loader::database::RawCardDatabase;
use crate::{DeckcheckError, Result};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Banned cards of one format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedCards {
    /// set code -> banned collector numbers
    #[serde(default)]
    pub pokemon: IndexMap<String, Vec<CardNumber>>,
    #[serde(default)]
    pub trainers: Vec<String>,
    #[serde(default)]
    pub energies: Vec<String>,
}

impl BannedCards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pokemon_banned(&self, set: &str, number: &CardNumber) -> bool {
        self.pokemon
            .get(set)
            .is_some_and(|numbers| numbers.contains(number))
    }

    /// Exact, case-sensitive name match
    pub fn is_trainer_banned(&self, name: &str) -> bool {
        self.trainers.iter().any(|banned| banned == name)
    }

    /// Exact, case-sensitive name match
    pub fn is_energy_banned(&self, name: &str) -> bool {
        self.energies.iter().any(|banned| banned == name)
    }

    pub fn ban_pokemon(&mut self, set: &str, number: impl Into<CardNumber>) {
        self.pokemon
            .entry(set.to_string())
            .or_default()
            .push(number.into());
    }

    pub fn ban_trainer(&mut self, name: &str) {
        if !self.is_trainer_banned(name) {
            self.trainers.push(name.to_string());
        }
    }

    pub fn ban_energy(&mut self, name: &str) {
        if !self.is_energy_banned(name) {
            self.energies.push(name.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty() && self.trainers.is_empty() && self.energies.is_empty()
    }
}

/// Banned lists keyed by format name ("standard", "expanded")
pub type BannedCardsByFormat = IndexMap<String, BannedCards>;

/// Load a converted `banned_cards.json`
pub fn load_banned_cards(path: &Path) -> Result<BannedCardsByFormat> {
    let content = std::fs::read_to_string(path)?;
    parse_banned_cards(&content)
}

pub fn parse_banned_cards(content: &str) -> Result<BannedCardsByFormat> {
    serde_json::from_str(content).map_err(|e| {
        DeckcheckError::InvalidInput(format!("Error loading banned cards: {e}"))
    })
}

/// Write banned lists in the shape `load_banned_cards` reads back
pub fn write_banned_cards(path: &Path, banned: &BannedCardsByFormat) -> Result<()> {
    let json = serde_json::to_string_pretty(banned)
        .map_err(|e| DeckcheckError::SerializationError(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// One line of a ban announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct BannedFeedEntry {
    pub card_name: String,
    /// Printed set title, or already a set code
    pub set_name: String,
    pub set_number: String,
}

impl BannedFeedEntry {
    pub fn new(card_name: &str, set_name: &str, set_number: &str) -> Self {
        BannedFeedEntry {
            card_name: card_name.to_string(),
            set_name: set_name.to_string(),
            set_number: set_number.to_string(),
        }
    }
}

impl From<(String, String, String)> for BannedFeedEntry {
    fn from((card_name, set_name, set_number): (String, String, String)) -> Self {
        BannedFeedEntry {
            card_name,
            set_name,
            set_number,
        }
    }
}

impl From<BannedFeedEntry> for (String, String, String) {
    fn from(entry: BannedFeedEntry) -> Self {
        (entry.card_name, entry.set_name, entry.set_number)
    }
}

/// Ban announcements keyed by format name
pub type RawBannedFeed = IndexMap<String, Vec<BannedFeedEntry>>;

pub fn parse_banned_feed(content: &str) -> Result<RawBannedFeed> {
    serde_json::from_str(content)
        .map_err(|e| DeckcheckError::InvalidInput(format!("Error loading banned feed: {e}")))
}

/// Resolve a raw ban feed into per-format banned lists
///
/// Set names are resolved through `sets` (falling back to the literal
/// string), then each card is looked up in the expanded export and filed by
/// its type line. Pokémon numbers are stored normalized; Trainer and Energy
/// names are stored once each, as spelled in the feed.
pub fn convert_banned_cards(
    feed: &RawBannedFeed,
    sets: &SetCodes,
    expanded: &RawCardDatabase,
) -> Result<BannedCardsByFormat> {
    let mut converted = BannedCardsByFormat::new();

    for (format, entries) in feed {
        let banned = converted.entry(format.clone()).or_default();

        for entry in entries {
            let set_code = sets.resolve(&entry.set_name);
            if !expanded.contains_set(set_code) {
                return Err(DeckcheckError::UnknownSet(set_code.to_string()));
            }

            let record = expanded.get(set_code, &entry.set_number).ok_or_else(|| {
                DeckcheckError::UnknownCardNumber {
                    set: set_code.to_string(),
                    number: entry.set_number.clone(),
                }
            })?;

            match record.category() {
                CardCategory::Pokemon { .. } => {
                    banned.ban_pokemon(set_code, entry.set_number.as_str())
                }
                CardCategory::Trainer => banned.ban_trainer(&entry.card_name),
                CardCategory::Energy { .. } => banned.ban_energy(&entry.card_name),
                CardCategory::Unknown => {
                    return Err(DeckcheckError::UnknownCardType {
                        set: set_code.to_string(),
                        number: entry.set_number.clone(),
                        card_type: record.card_type.clone(),
                    });
                }
            }
        }

        debug!(
            "Converted {} banned entries for {format}: {} Pokémon sets, {} Trainers, {} Energies",
            entries.len(),
            banned.pokemon.len(),
            banned.trainers.len(),
            banned.energies.len()
        );
    }

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded() -> RawCardDatabase {
        RawCardDatabase::from_json(
            r#"{
                "cards": {
                    "PAF": {
                        "076": {"name": "Charizard ex", "type": "Pkmn Stage 2 Fire", "rarity": "Rare"},
                        "84": {"name": "Nest Ball", "type": "Trainer Item", "rarity": "Uncommon"}
                    },
                    "SVE": {
                        "20": {"name": "Luminous Energy", "type": "Energy Special", "rarity": "Uncommon"}
                    },
                    "XXX": {
                        "1": {"name": "Mystery", "type": "Token", "rarity": "Common"}
                    }
                },
                "count": 4
            }"#,
        )
        .unwrap()
    }

    fn sets() -> SetCodes {
        let mut sets = SetCodes::new();
        sets.insert("Paldean Fates", "PAF");
        sets
    }

    #[test]
    fn test_convert_classifies_entries() {
        let feed: RawBannedFeed = parse_banned_feed(
            r#"{
                "standard": [
                    ["Charizard ex", "Paldean Fates", "076"],
                    ["Nest Ball", "paldean fates", "84"],
                    ["Nest Ball", "PAF", "84"],
                    ["Luminous Energy", "SVE", "20"]
                ],
                "expanded": []
            }"#,
        )
        .unwrap();

        let converted = convert_banned_cards(&feed, &sets(), &expanded()).unwrap();
        let standard = &converted["standard"];
        assert_eq!(standard.pokemon["PAF"], vec![CardNumber::new("76")]);
        assert_eq!(standard.trainers, vec!["Nest Ball".to_string()]);
        assert_eq!(standard.energies, vec!["Luminous Energy".to_string()]);
        assert!(converted["expanded"].is_empty());
    }

    #[test]
    fn test_unknown_set_is_fatal() {
        let mut feed = RawBannedFeed::new();
        feed.insert(
            "standard".to_string(),
            vec![BannedFeedEntry::new("Nest Ball", "Unreleased Set", "1")],
        );
        let err = convert_banned_cards(&feed, &sets(), &expanded()).unwrap_err();
        assert_eq!(err.to_string(), "Set code Unreleased Set not found in expanded cards.");
    }

    #[test]
    fn test_unknown_number_is_fatal() {
        let mut feed = RawBannedFeed::new();
        feed.insert(
            "standard".to_string(),
            vec![BannedFeedEntry::new("Nest Ball", "Paldean Fates", "999")],
        );
        let err = convert_banned_cards(&feed, &sets(), &expanded()).unwrap_err();
        assert_eq!(err.to_string(), "Card number PAF-999 not found in expanded cards.");
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let mut feed = RawBannedFeed::new();
        feed.insert(
            "expanded".to_string(),
            vec![BannedFeedEntry::new("Mystery", "XXX", "1")],
        );
        let err = convert_banned_cards(&feed, &sets(), &expanded()).unwrap_err();
        assert!(matches!(err, DeckcheckError::UnknownCardType { .. }));
        assert_eq!(err.to_string(), "Card XXX-1 has unknown type Token.");
    }

    #[test]
    fn test_banned_lookups() {
        let mut banned = BannedCards::new();
        banned.ban_pokemon("PAF", "076");
        banned.ban_trainer("Nest Ball");
        banned.ban_trainer("Nest Ball");

        assert!(banned.is_pokemon_banned("PAF", &CardNumber::new("76")));
        assert!(!banned.is_pokemon_banned("PAF", &CardNumber::new("77")));
        assert_eq!(banned.trainers.len(), 1);
        assert!(banned.is_trainer_banned("Nest Ball"));
        assert!(!banned.is_trainer_banned("nest ball"));
    }

    #[test]
    fn test_banned_cards_file_shape() {
        let parsed = parse_banned_cards(
            r#"{"standard": {"pokemon": {"PAF": ["76"]}, "trainers": ["Nest Ball"], "energies": []}}"#,
        )
        .unwrap();
        assert!(parsed["standard"].is_pokemon_banned("PAF", &CardNumber::new("076")));
    }
}
