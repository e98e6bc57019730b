//! Decklist validation
//!
//! Construction rules always apply. Card-pool rules apply only when a
//! legal pool is supplied and ban rules only when a banned list is, so the
//! same validator serves a quick "is this even a deck" check and a full
//! format audit.

pub mod report;
pub mod rules;

pub use report::{check_formats, FormatReport, FormatResult, FormatRules};
pub use rules::{CardTally, Rule, RuleInput, RULES};

use crate::core::Decklist;
use crate::loader::{BannedCards, LegalCardPool};
use thiserror::Error;

/// Why a decklist is not legal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Decklist must contain exactly 60 cards.")]
    WrongDeckSize,

    #[error("Decklist must contain at least 1 Pokémon.")]
    NoPokemon,

    #[error("Card {name} exceeds the maximum of 4 copies.")]
    TooManyCopies { name: String },

    #[error("Decklist can only contain one Ace Spec card.")]
    TooManyAceSpecs,

    #[error("Card {name} from set {set} is not legal.")]
    IllegalPokemon { name: String, set: String },

    #[error("Decklist must contain at least one Basic Pokémon.")]
    NoBasicPokemon,

    #[error("Trainer card {name} is not legal.")]
    IllegalTrainer { name: String },

    #[error("Energy card {name} is not legal.")]
    IllegalEnergy { name: String },

    #[error("Card {name} from set {set} is banned.")]
    BannedPokemon { name: String, set: String },

    #[error("Trainer card {name} is banned.")]
    BannedTrainer { name: String },

    #[error("Energy card {name} is banned.")]
    BannedEnergy { name: String },
}

/// Outcome of validating one decklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Legal,
    Illegal(Violation),
}

impl Verdict {
    pub fn is_legal(&self) -> bool {
        matches!(self, Verdict::Legal)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Verdict::Legal => None,
            Verdict::Illegal(violation) => Some(violation),
        }
    }

    /// Failure message, empty for a legal deck
    pub fn reason(&self) -> String {
        self.violation().map(ToString::to_string).unwrap_or_default()
    }
}

impl From<Verdict> for (bool, String) {
    fn from(verdict: Verdict) -> Self {
        (verdict.is_legal(), verdict.reason())
    }
}

impl From<Option<Violation>> for Verdict {
    fn from(violation: Option<Violation>) -> Self {
        match violation {
            Some(violation) => Verdict::Illegal(violation),
            None => Verdict::Legal,
        }
    }
}

/// Validate a decklist against the construction rules and, when given, a
/// format's legal pool and banned list
pub fn validate(
    deck: &Decklist,
    legal: Option<&LegalCardPool>,
    banned: Option<&BannedCards>,
) -> Verdict {
    let tally = CardTally::new(deck);
    let input = RuleInput {
        deck,
        tally: &tally,
        legal,
        banned,
    };
    rules::first_violation(&input).into()
}

/// Construction rules only: size, Pokémon count and copy limits
pub fn validate_construction(deck: &Decklist) -> Verdict {
    validate(deck, None, None)
}
