//! Decklist representation
//!
//! A decklist is whatever a deck builder produced. Nothing is enforced at
//! construction: an empty or 200-card list is a perfectly good `Decklist`,
//! it just won't validate.

use crate::core::CardNumber;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One Pokémon line of a decklist, identified by print
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEntry {
    pub name: String,
    pub set: String,
    pub number: CardNumber,
    pub quantity: u32,
}

impl PokemonEntry {
    pub fn new(
        name: impl Into<String>,
        set: impl Into<String>,
        number: impl Into<CardNumber>,
        quantity: u32,
    ) -> Self {
        PokemonEntry {
            name: name.into(),
            set: set.into(),
            number: number.into(),
            quantity,
        }
    }
}

/// Copies of a Trainer or Energy card, keyed by name in the decklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardQuantity {
    pub quantity: u32,
}

/// A complete decklist
///
/// Trainer and Energy names are kept exactly as entered and in insertion
/// order; the order decides which card is reported first when several
/// break the same rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decklist {
    #[serde(default)]
    pub pokemon: Vec<PokemonEntry>,
    #[serde(default)]
    pub trainers: IndexMap<String, CardQuantity>,
    #[serde(default)]
    pub energies: IndexMap<String, CardQuantity>,
}

impl Decklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pokemon(
        mut self,
        name: &str,
        set: &str,
        number: impl Into<CardNumber>,
        quantity: u32,
    ) -> Self {
        self.pokemon
            .push(PokemonEntry::new(name, set, number, quantity));
        self
    }

    /// Add Trainer copies, merging with an existing entry of the same name
    pub fn with_trainer(mut self, name: &str, quantity: u32) -> Self {
        self.add_trainer(name, quantity);
        self
    }

    /// Add Energy copies, merging with an existing entry of the same name
    pub fn with_energy(mut self, name: &str, quantity: u32) -> Self {
        self.add_energy(name, quantity);
        self
    }

    pub fn add_trainer(&mut self, name: &str, quantity: u32) {
        let entry = self
            .trainers
            .entry(name.to_string())
            .or_insert(CardQuantity { quantity: 0 });
        entry.quantity = entry.quantity.saturating_add(quantity);
    }

    pub fn add_energy(&mut self, name: &str, quantity: u32) {
        let entry = self
            .energies
            .entry(name.to_string())
            .or_insert(CardQuantity { quantity: 0 });
        entry.quantity = entry.quantity.saturating_add(quantity);
    }

    // Summed as u64: a u32 total of huge quantities could wrap back to 60.

    pub fn pokemon_count(&self) -> u64 {
        self.pokemon.iter().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn trainer_count(&self) -> u64 {
        self.trainers.values().map(|q| u64::from(q.quantity)).sum()
    }

    pub fn energy_count(&self) -> u64 {
        self.energies.values().map(|q| u64::from(q.quantity)).sum()
    }

    /// Total cards across all three categories
    pub fn total_cards(&self) -> u64 {
        self.pokemon_count() + self.trainer_count() + self.energy_count()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty() && self.trainers.is_empty() && self.energies.is_empty()
    }
}

/// Deck listing: Pokémon sorted by name with their print, then Trainers
/// and Energies sorted by name. Empty sections are left out.
impl fmt::Display for Decklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections: Vec<String> = Vec::new();

        if !self.pokemon.is_empty() {
            let mut sorted: Vec<&PokemonEntry> = self.pokemon.iter().collect();
            sorted.sort_by(|a, b| a.name.cmp(&b.name));
            let lines: Vec<String> = sorted
                .iter()
                .map(|p| format!("\t{}x {} {}-{}", p.quantity, p.name, p.set, p.number))
                .collect();
            sections.push(format!("Pokemon:\n{}", lines.join("\n")));
        }

        for (title, cards) in [("Trainers", &self.trainers), ("Energies", &self.energies)] {
            if cards.is_empty() {
                continue;
            }
            let mut names: Vec<&String> = cards.keys().collect();
            names.sort();
            let lines: Vec<String> = names
                .iter()
                .map(|name| format!("\t{}x {}", cards[name.as_str()].quantity, name))
                .collect();
            sections.push(format!("{title}:\n{}", lines.join("\n")));
        }

        write!(f, "{}", sections.join("\n"))
    }
}
