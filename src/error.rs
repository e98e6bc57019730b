//! Error types for deck checking
//!
//! These cover broken reference data and unreadable input files. A decklist
//! that breaks a construction rule is not an error, see `validate::Verdict`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckcheckError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Set code {0} not found in expanded cards.")]
    UnknownSet(String),

    #[error("Card number {set}-{number} not found in expanded cards.")]
    UnknownCardNumber { set: String, number: String },

    #[error("Card {set}-{number} has unknown type {card_type}.")]
    UnknownCardType {
        set: String,
        number: String,
        card_type: String,
    },

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, DeckcheckError>;
