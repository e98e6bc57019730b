//! Core card and deck types

pub mod card;
pub mod deck;
pub mod format;
pub mod sets;
pub mod types;

pub use card::{is_basic_energy_name, CardCategory, CardRecord, LegalCard, ACE_SPEC_RARITY};
pub use deck::{CardQuantity, Decklist, PokemonEntry};
pub use format::Format;
pub use sets::SetCodes;
pub use types::CardNumber;
