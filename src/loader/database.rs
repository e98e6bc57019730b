//! Legal card database
//!
//! A legality export is `{"cards": {set: {number: record}}, "count": n}`.
//! `RawCardDatabase` is that document as-is; `LegalCardPool` is the indexed
//! form the validator reads: Pokémon by set and normalized number, Trainers
//! and special Energies by name.

use crate::core::{CardCategory, CardNumber, CardRecord, LegalCard};
use crate::{DeckcheckError, Result};
use indexmap::IndexMap;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A legality export exactly as scraped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCardDatabase {
    #[serde(default)]
    pub cards: IndexMap<String, IndexMap<String, CardRecord>>,
    /// Card total at the last sync, only used to detect stale exports
    #[serde(default)]
    pub count: u64,
}

impl RawCardDatabase {
    /// Parse an export, rejecting anything that is not a JSON object of the
    /// expected shape
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| DeckcheckError::InvalidInput(format!("Error loading JSON file: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(DeckcheckError::InvalidInput(
                "Error loading JSON file: top level must be an object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| DeckcheckError::InvalidInput(format!("Error loading JSON file: {e}")))
    }

    /// Load an export from disk; the file must have a `.json` extension
    pub fn load_from_file(path: &Path) -> Result<Self> {
        check_json_extension(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            DeckcheckError::InvalidInput(format!("Error loading JSON file: {e}"))
        })?;
        Self::from_json(&content)
    }

    /// Async twin of [`RawCardDatabase::load_from_file`]
    pub async fn load_from_file_async(path: &Path) -> Result<Self> {
        check_json_extension(path)?;
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DeckcheckError::InvalidInput(format!("Error loading JSON file: {e}"))
        })?;
        Self::from_json(&content)
    }

    /// Look up a card by set code and collector number
    ///
    /// The literal number is tried first, then any key of the set that
    /// normalizes to the same value ("087" finds "87" and vice versa).
    pub fn get(&self, set: &str, number: &str) -> Option<&CardRecord> {
        let set_cards = self.cards.get(set)?;
        set_cards.get(number).or_else(|| {
            let wanted = CardNumber::new(number);
            set_cards
                .iter()
                .find(|(key, _)| CardNumber::new(key.as_str()) == wanted)
                .map(|(_, record)| record)
        })
    }

    pub fn contains_set(&self, set: &str) -> bool {
        self.cards.contains_key(set)
    }

    /// Total records across all sets
    pub fn len(&self) -> usize {
        self.cards.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_json_extension(path: &Path) -> Result<()> {
    if path.extension().and_then(|s| s.to_str()) != Some("json") {
        return Err(DeckcheckError::InvalidInput(
            "Filename must be a JSON file.".to_string(),
        ));
    }
    Ok(())
}

/// Indexed pool of cards legal in one format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegalCardPool {
    /// set code -> normalized number -> card
    pub pokemon: FxHashMap<String, FxHashMap<CardNumber, LegalCard>>,
    /// Trainers by exact name
    pub trainers: FxHashMap<String, LegalCard>,
    /// Special (non-basic) Energies by exact name
    pub energies: FxHashMap<String, LegalCard>,
    pub count: u64,
}

impl LegalCardPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and index a legality export
    pub fn load(raw_json: &str, banned_sets: &[String]) -> Result<Self> {
        let raw = RawCardDatabase::from_json(raw_json)?;
        Ok(Self::from_raw(&raw, banned_sets))
    }

    pub fn load_from_file(path: &Path, banned_sets: &[String]) -> Result<Self> {
        let raw = RawCardDatabase::load_from_file(path)?;
        Ok(Self::from_raw(&raw, banned_sets))
    }

    pub async fn load_from_file_async(path: &Path, banned_sets: &[String]) -> Result<Self> {
        let raw = RawCardDatabase::load_from_file_async(path).await?;
        Ok(Self::from_raw(&raw, banned_sets))
    }

    /// Index a raw export, dropping every card of the excluded sets
    ///
    /// Basic energies never enter the pool: they are legal everywhere and
    /// the validator exempts them by name. Records of unknown type are
    /// ignored.
    pub fn from_raw(raw: &RawCardDatabase, banned_sets: &[String]) -> Self {
        let excluded: FxHashSet<&str> = banned_sets.iter().map(String::as_str).collect();
        let mut pool = LegalCardPool {
            count: raw.count,
            ..Self::default()
        };

        for (set_code, cards) in &raw.cards {
            if excluded.contains(set_code.as_str()) {
                debug!("Skipping {} cards from excluded set {set_code}", cards.len());
                continue;
            }

            for (number, record) in cards {
                pool.add_card(set_code, number, record.clone());
            }
        }

        debug!(
            "Indexed {} Pokémon, {} Trainers, {} Energies (count {})",
            pool.pokemon_len(),
            pool.trainers.len(),
            pool.energies.len(),
            pool.count
        );
        pool
    }

    /// Add a single card, classifying it by its type line
    pub fn add_card(&mut self, set: &str, number: &str, record: CardRecord) {
        let card = LegalCard::new(record);
        match card.category {
            CardCategory::Pokemon { .. } => {
                self.pokemon
                    .entry(set.to_string())
                    .or_default()
                    .insert(CardNumber::new(number), card);
            }
            CardCategory::Trainer => {
                self.trainers.insert(card.record.name.clone(), card);
            }
            CardCategory::Energy { basic: false } => {
                self.energies.insert(card.record.name.clone(), card);
            }
            CardCategory::Energy { basic: true } | CardCategory::Unknown => {}
        }
    }

    pub fn pokemon_card(&self, set: &str, number: &CardNumber) -> Option<&LegalCard> {
        self.pokemon.get(set)?.get(number)
    }

    pub fn trainer(&self, name: &str) -> Option<&LegalCard> {
        self.trainers.get(name)
    }

    pub fn energy(&self, name: &str) -> Option<&LegalCard> {
        self.energies.get(name)
    }

    /// Lower-cased names of every ACE SPEC Trainer and Energy
    pub fn ace_spec_names(&self) -> FxHashSet<String> {
        self.trainers
            .values()
            .chain(self.energies.values())
            .filter(|card| card.is_ace_spec())
            .map(|card| card.name().to_lowercase())
            .collect()
    }

    /// Number of indexed Pokémon prints
    pub fn pokemon_len(&self) -> usize {
        self.pokemon.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty() && self.trainers.is_empty() && self.energies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "cards": {
            "WHT": {
                "087": {"name": "Sewaddle", "type": "Pkmn Basic Grass", "rarity": "Common"},
                "088": {"name": "Swadloon", "type": "Pkmn Stage 1 Grass", "rarity": "Common"},
                "TG05": {"name": "Leavanny", "type": "Pkmn Stage 2 Grass", "rarity": "Rare"}
            },
            "PAF": {
                "84": {"name": "Nest Ball", "type": "Trainer Item", "rarity": "Uncommon"},
                "91": {"name": "Prime Catcher", "type": "Trainer Item", "rarity": "ACE SPEC Rare"}
            },
            "SVE": {
                "2": {"name": "Fire Energy", "type": "Energy Basic", "rarity": "Common"},
                "20": {"name": "Luminous Energy", "type": "Energy Special", "rarity": "Uncommon"}
            }
        },
        "count": 7
    }"#;

    #[test]
    fn test_empty_pool() {
        let pool = LegalCardPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.pokemon_len(), 0);
        assert!(pool.trainer("Nest Ball").is_none());
    }

    #[test]
    fn test_load_categorizes_cards() {
        let pool = LegalCardPool::load(SAMPLE, &[]).unwrap();
        assert_eq!(pool.count, 7);
        assert_eq!(pool.pokemon_len(), 3);
        assert_eq!(pool.trainers.len(), 2);
        assert_eq!(pool.energies.len(), 1);

        // Numeric keys lose their leading zeros, others stay literal
        let sewaddle = pool.pokemon_card("WHT", &CardNumber::new("87")).unwrap();
        assert_eq!(sewaddle.name(), "Sewaddle");
        assert!(sewaddle.is_basic_pokemon());
        assert!(pool.pokemon_card("WHT", &CardNumber::new("TG05")).is_some());

        // Basic energies are never indexed
        assert!(pool.energy("Fire Energy").is_none());
        assert!(pool.energy("Luminous Energy").is_some());
    }

    #[test]
    fn test_load_is_repeatable() {
        let first = LegalCardPool::load(SAMPLE, &[]).unwrap();
        let second = LegalCardPool::load(SAMPLE, &[]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_name_keys_are_case_sensitive() {
        let pool = LegalCardPool::load(SAMPLE, &[]).unwrap();
        assert!(pool.trainer("Nest Ball").is_some());
        assert!(pool.trainer("nest ball").is_none());
    }

    #[test]
    fn test_excluded_sets_are_dropped() {
        let pool = LegalCardPool::load(SAMPLE, &["WHT".to_string()]).unwrap();
        assert_eq!(pool.pokemon_len(), 0);
        assert_eq!(pool.trainers.len(), 2);
    }

    #[test]
    fn test_ace_spec_names() {
        let pool = LegalCardPool::load(SAMPLE, &[]).unwrap();
        let names = pool.ace_spec_names();
        assert_eq!(names.len(), 1);
        assert!(names.contains("prime catcher"));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            LegalCardPool::load("invalid json", &[]),
            Err(DeckcheckError::InvalidInput(_))
        ));
        assert!(matches!(
            LegalCardPool::load("[1, 2, 3]", &[]),
            Err(DeckcheckError::InvalidInput(_))
        ));
        assert!(matches!(
            LegalCardPool::load(r#"{"cards": {"WHT": {"1": {"name": "No Type"}}}}"#, &[]),
            Err(DeckcheckError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_sections_default() {
        let pool = LegalCardPool::load("{}", &[]).unwrap();
        assert!(pool.is_empty());
        assert_eq!(pool.count, 0);
    }

    #[test]
    fn test_load_from_file_requires_json_extension() {
        let err = LegalCardPool::load_from_file(Path::new("legal_cards.txt"), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Filename must be a JSON file.");
    }

    #[test]
    fn test_raw_lookup_normalizes_numbers() {
        let raw = RawCardDatabase::from_json(SAMPLE).unwrap();
        assert_eq!(raw.len(), 7);
        assert_eq!(raw.get("WHT", "087").unwrap().name, "Sewaddle");
        assert_eq!(raw.get("WHT", "87").unwrap().name, "Sewaddle");
        assert!(raw.get("WHT", "99").is_none());
        assert!(raw.get("XYZ", "1").is_none());
    }

    #[test]
    fn test_add_card() {
        let mut pool = LegalCardPool::new();
        pool.add_card("PAR", "070", CardRecord::new("Iron Hands ex", "Pkmn Basic Lightning"));
        pool.add_card("SVE", "2", CardRecord::new("Fire Energy", "Energy Basic"));
        assert!(pool.pokemon_card("PAR", &CardNumber::new("70")).is_some());
        assert!(pool.energies.is_empty());
    }
}
