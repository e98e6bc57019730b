//! Loaders for legality data and decklists
//!
//! Legal card exports, banned lists and decklists all arrive as files
//! produced by other tools; everything here turns them into typed values.

pub mod banned;
pub mod database;
pub mod deck;
pub mod snapshot;

pub use banned::{
    convert_banned_cards, load_banned_cards, write_banned_cards, BannedCards, BannedCardsByFormat,
    BannedFeedEntry, RawBannedFeed,
};
pub use database::{LegalCardPool, RawCardDatabase};
pub use deck::DeckLoader;
pub use snapshot::DataSnapshot;
