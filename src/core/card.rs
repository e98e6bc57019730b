//! Card records and their categories
//!
//! A card record is one row of a legality export. Its free-form `type` line
//! ("Pkmn Basic Grass", "Trainer Item", "Energy Basic", "Energy Special")
//! is classified exactly once, when the record enters a `LegalCard`.

use serde::{Deserialize, Serialize};

/// Rarity string that marks a card subject to the one-per-deck ACE SPEC cap
pub const ACE_SPEC_RARITY: &str = "ACE SPEC Rare";

/// The eight basic energy types
///
/// "<type> energy" (any case) is exempt from the copy cap and from every
/// legality and banned-list check.
pub const ENERGY_TYPES: [&str; 8] = [
    "fire",
    "water",
    "grass",
    "lightning",
    "psychic",
    "fighting",
    "darkness",
    "metal",
];

/// Whether a card name is one of the exempt basic energies
pub fn is_basic_energy_name(name: &str) -> bool {
    name.to_lowercase()
        .strip_suffix(" energy")
        .is_some_and(|kind| ENERGY_TYPES.contains(&kind))
}

/// One card as it appears in a legality export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Any further columns the export carries
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CardRecord {
    pub fn new(name: impl Into<String>, card_type: impl Into<String>) -> Self {
        CardRecord {
            name: name.into(),
            card_type: card_type.into(),
            rarity: String::new(),
            color: None,
            link: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn category(&self) -> CardCategory {
        CardCategory::from_type_line(&self.card_type)
    }
}

/// Closed classification of a card's type line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardCategory {
    /// Type line starts with "Pkmn"; `basic` when it mentions "Basic"
    Pokemon { basic: bool },
    /// Type line starts with "Trainer"
    Trainer,
    /// Type line starts with "Energy"; `basic` when it ends in "Basic"
    Energy { basic: bool },
    Unknown,
}

impl CardCategory {
    pub fn from_type_line(type_line: &str) -> Self {
        if type_line.starts_with("Pkmn") {
            CardCategory::Pokemon {
                basic: type_line.contains("Basic"),
            }
        } else if type_line.starts_with("Trainer") {
            CardCategory::Trainer
        } else if type_line.starts_with("Energy") {
            CardCategory::Energy {
                basic: type_line.ends_with("Basic"),
            }
        } else {
            CardCategory::Unknown
        }
    }

    pub fn is_pokemon(&self) -> bool {
        matches!(self, CardCategory::Pokemon { .. })
    }
}

/// A card record together with its classification
#[derive(Debug, Clone, PartialEq)]
pub struct LegalCard {
    pub record: CardRecord,
    pub category: CardCategory,
}

impl LegalCard {
    pub fn new(record: CardRecord) -> Self {
        let category = record.category();
        LegalCard { record, category }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn is_basic_pokemon(&self) -> bool {
        self.category == CardCategory::Pokemon { basic: true }
    }

    pub fn is_ace_spec(&self) -> bool {
        self.record.rarity == ACE_SPEC_RARITY
    }
}

impl From<CardRecord> for LegalCard {
    fn from(record: CardRecord) -> Self {
        LegalCard::new(record)
    }
}
