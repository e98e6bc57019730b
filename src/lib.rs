//! Pokémon TCG decklist legality checking
//!
//! Loads a format's legal card export and banned list, then checks
//! decklists against the deck construction rules of that format.

pub mod audit;
pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod validate;

pub use error::{DeckcheckError, Result};
pub use validate::{validate, Verdict, Violation};
