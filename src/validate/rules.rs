//! Deck construction rules
//!
//! Each rule is a pure check over one decklist that either passes or names
//! the violation. Rules run in table order and the first violation wins.
//! Legality rules pass trivially when no card pool was supplied, ban rules
//! when no banned list was supplied.
//!
//! Copy-cap and ACE SPEC matching compare lower-cased names. Pool and
//! banned-list lookups use names exactly as entered.

use crate::core::{is_basic_energy_name, Decklist};
use crate::loader::{BannedCards, LegalCardPool};
use crate::validate::Violation;
use indexmap::IndexMap;

/// Cards a legal deck must contain, exactly
pub const DECK_SIZE: u64 = 60;

/// Copies allowed of any one card other than basic energy
pub const MAX_COPIES: u64 = 4;

/// ACE SPEC cards allowed in a whole deck
pub const MAX_ACE_SPECS: u64 = 1;

/// Counts derived from a decklist once, shared by every rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardTally {
    pub pokemon: u64,
    pub total: u64,
    /// Lower-cased name -> copies across all categories, in deck order
    pub by_name: IndexMap<String, u64>,
}

impl CardTally {
    pub fn new(deck: &Decklist) -> Self {
        let mut by_name: IndexMap<String, u64> = IndexMap::new();
        let names = deck
            .pokemon
            .iter()
            .map(|entry| (entry.name.as_str(), entry.quantity))
            .chain(deck.trainers.iter().map(|(name, q)| (name.as_str(), q.quantity)))
            .chain(deck.energies.iter().map(|(name, q)| (name.as_str(), q.quantity)));
        for (name, quantity) in names {
            *by_name.entry(name.to_lowercase()).or_insert(0) += u64::from(quantity);
        }

        CardTally {
            pokemon: deck.pokemon_count(),
            total: deck.total_cards(),
            by_name,
        }
    }
}

/// Everything a rule may look at
pub struct RuleInput<'a> {
    pub deck: &'a Decklist,
    pub tally: &'a CardTally,
    pub legal: Option<&'a LegalCardPool>,
    pub banned: Option<&'a BannedCards>,
}

/// A named construction rule
pub struct Rule {
    pub name: &'static str,
    pub check: fn(&RuleInput) -> Option<Violation>,
}

/// All rules in evaluation order
pub const RULES: &[Rule] = &[
    Rule { name: "deck_size", check: deck_size },
    Rule { name: "has_pokemon", check: has_pokemon },
    Rule { name: "copy_limit", check: copy_limit },
    Rule { name: "ace_spec_limit", check: ace_spec_limit },
    Rule { name: "pokemon_legal", check: pokemon_legal },
    Rule { name: "has_basic_pokemon", check: has_basic_pokemon },
    Rule { name: "trainers_legal", check: trainers_legal },
    Rule { name: "energies_legal", check: energies_legal },
    Rule { name: "pokemon_not_banned", check: pokemon_not_banned },
    Rule { name: "trainers_not_banned", check: trainers_not_banned },
    Rule { name: "energies_not_banned", check: energies_not_banned },
];

/// Run the rule table, stopping at the first violation
pub fn first_violation(input: &RuleInput) -> Option<Violation> {
    RULES.iter().find_map(|rule| (rule.check)(input))
}

pub fn deck_size(input: &RuleInput) -> Option<Violation> {
    (input.tally.total != DECK_SIZE).then_some(Violation::WrongDeckSize)
}

pub fn has_pokemon(input: &RuleInput) -> Option<Violation> {
    (input.tally.pokemon < 1).then_some(Violation::NoPokemon)
}

pub fn copy_limit(input: &RuleInput) -> Option<Violation> {
    input
        .tally
        .by_name
        .iter()
        .find(|(name, quantity)| **quantity > MAX_COPIES && !is_basic_energy_name(name))
        .map(|(name, _)| Violation::TooManyCopies { name: name.clone() })
}

pub fn ace_spec_limit(input: &RuleInput) -> Option<Violation> {
    let legal = input.legal?;
    let ace_specs = legal.ace_spec_names();
    let total: u64 = input
        .tally
        .by_name
        .iter()
        .filter(|(name, _)| ace_specs.contains(name.as_str()))
        .map(|(_, quantity)| quantity)
        .sum();
    (total > MAX_ACE_SPECS).then_some(Violation::TooManyAceSpecs)
}

pub fn pokemon_legal(input: &RuleInput) -> Option<Violation> {
    let legal = input.legal?;
    input
        .deck
        .pokemon
        .iter()
        .find(|entry| legal.pokemon_card(&entry.set, &entry.number).is_none())
        .map(|entry| Violation::IllegalPokemon {
            name: entry.name.clone(),
            set: entry.set.clone(),
        })
}

pub fn has_basic_pokemon(input: &RuleInput) -> Option<Violation> {
    let legal = input.legal?;
    let found = input.deck.pokemon.iter().any(|entry| {
        legal
            .pokemon_card(&entry.set, &entry.number)
            .is_some_and(|card| card.is_basic_pokemon())
    });
    (!found).then_some(Violation::NoBasicPokemon)
}

pub fn trainers_legal(input: &RuleInput) -> Option<Violation> {
    let legal = input.legal?;
    input
        .deck
        .trainers
        .keys()
        .find(|name| legal.trainer(name).is_none())
        .map(|name| Violation::IllegalTrainer { name: name.clone() })
}

pub fn energies_legal(input: &RuleInput) -> Option<Violation> {
    let legal = input.legal?;
    input
        .deck
        .energies
        .keys()
        .find(|name| legal.energy(name).is_none() && !is_basic_energy_name(name))
        .map(|name| Violation::IllegalEnergy { name: name.clone() })
}

pub fn pokemon_not_banned(input: &RuleInput) -> Option<Violation> {
    let banned = input.banned?;
    input
        .deck
        .pokemon
        .iter()
        .find(|entry| banned.is_pokemon_banned(&entry.set, &entry.number))
        .map(|entry| Violation::BannedPokemon {
            name: entry.name.clone(),
            set: entry.set.clone(),
        })
}

pub fn trainers_not_banned(input: &RuleInput) -> Option<Violation> {
    let banned = input.banned?;
    input
        .deck
        .trainers
        .keys()
        .find(|name| banned.is_trainer_banned(name))
        .map(|name| Violation::BannedTrainer { name: name.clone() })
}

pub fn energies_not_banned(input: &RuleInput) -> Option<Violation> {
    let banned = input.banned?;
    input
        .deck
        .energies
        .keys()
        .find(|name| banned.is_energy_banned(name) && !is_basic_energy_name(name))
        .map(|name| Violation::BannedEnergy { name: name.clone() })
}
