//! Decklist loaders
//!
//! Two on-disk shapes are understood: the JSON document deck builders hand
//! over (`{pokemon: [...], trainers: {...}, energies: {...}}`) and the plain
//! text export of the TCG Live / Limitless deck builders:
//!
//! ```text
//! Pokémon: 2
//! 1 Sewaddle WHT 87
//! 1 Iron Hands ex PAR 70
//! Trainer: 1
//! 4 Ultra Ball SVI 196
//! Energy: 1
//! 54 Basic {R} Energy SVE 2
//! ```
//!
//! Trainer and Energy lines may or may not carry a trailing set code and
//! number; either way the card is keyed by name alone. Basic energies
//! written with their type symbol (`Basic {R} Energy`) become `Fire Energy`.

use crate::core::{Decklist, PokemonEntry};
use crate::{DeckcheckError, Result};
use std::fs;
use std::path::Path;

/// Deck loader for `.json` and text decklists
pub struct DeckLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Pokemon,
    Trainer,
    Energy,
}

impl DeckLoader {
    /// Load a decklist, picking the parser from the file extension
    pub fn load_from_file(path: &Path) -> Result<Decklist> {
        let content = fs::read_to_string(path)?;
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            Self::parse_json(&content)
        } else {
            Self::parse_text(&content)
        }
    }

    /// Parse the JSON decklist shape; absent categories are empty
    pub fn parse_json(content: &str) -> Result<Decklist> {
        serde_json::from_str(content).map_err(|e| DeckcheckError::InvalidDeckFormat(e.to_string()))
    }

    /// Parse a text export
    ///
    /// Repeated Trainer or Energy names are merged into one entry. Lines
    /// that don't start with a count ("Total Cards: 60") are ignored.
    pub fn parse_text(content: &str) -> Result<Decklist> {
        let mut deck = Decklist::new();
        let mut section = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = section_header(line) {
                section = Some(header);
                continue;
            }

            let Some((count_str, rest)) = line.split_once(' ') else {
                continue;
            };
            let Ok(count) = count_str.parse::<u32>() else {
                continue;
            };
            let rest = rest.trim();

            match section {
                Some(Section::Pokemon) => {
                    let tokens: Vec<&str> = rest.split_whitespace().collect();
                    if tokens.len() < 3 {
                        return Err(DeckcheckError::InvalidDeckFormat(format!(
                            "Pokémon line needs a set and number: '{line}'"
                        )));
                    }
                    let (name_tokens, print) = tokens.split_at(tokens.len() - 2);
                    deck.pokemon.push(PokemonEntry::new(
                        name_tokens.join(" "),
                        print[0],
                        print[1],
                        count,
                    ));
                }
                Some(Section::Trainer) => deck.add_trainer(strip_print(rest), count),
                Some(Section::Energy) => {
                    let name = strip_print(rest);
                    match basic_energy_from_symbol(name) {
                        Some(basic) => deck.add_energy(&basic, count),
                        None => deck.add_energy(name, count),
                    }
                }
                None => {
                    return Err(DeckcheckError::InvalidDeckFormat(format!(
                        "Card line before any section header: '{line}'"
                    )));
                }
            }
        }

        if deck.is_empty() {
            return Err(DeckcheckError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(deck)
    }
}

/// Recognize "Pokémon: 12", "Trainer:", "Energies: 8" and similar headers
fn section_header(line: &str) -> Option<Section> {
    let (label, tail) = line.split_once(':')?;
    if !tail.trim().chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match deunicode::deunicode(label).trim().to_lowercase().as_str() {
        "pokemon" => Some(Section::Pokemon),
        "trainer" | "trainers" => Some(Section::Trainer),
        "energy" | "energies" => Some(Section::Energy),
        _ => None,
    }
}

/// Energy type symbols used by deck builder exports
const ENERGY_SYMBOLS: [(&str, &str); 8] = [
    ("G", "Grass"),
    ("R", "Fire"),
    ("W", "Water"),
    ("L", "Lightning"),
    ("P", "Psychic"),
    ("F", "Fighting"),
    ("D", "Darkness"),
    ("M", "Metal"),
];

/// Drop a trailing "SET NUMBER" print from a card name, if present
fn strip_print(rest: &str) -> &str {
    let mut tokens = rest.rsplitn(3, ' ');
    let (Some(number), Some(set), Some(name)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return rest;
    };
    if is_set_code(set) && is_collector_number(number) {
        name.trim_end()
    } else {
        rest
    }
}

/// "SVI", "PAF", "PR-SV": upper-case letters and digits with at least one letter
fn is_set_code(token: &str) -> bool {
    (2..=6).contains(&token.len())
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        && token.chars().any(|c| c.is_ascii_uppercase())
}

/// "196", "TG05", "GG12": alphanumeric with at least one digit
fn is_collector_number(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_alphanumeric()) && token.chars().any(|c| c.is_ascii_digit())
}

/// "Basic {R} Energy" -> "Fire Energy"
fn basic_energy_from_symbol(name: &str) -> Option<String> {
    let symbol = name
        .strip_prefix("Basic {")?
        .strip_suffix("} Energy")?;
    ENERGY_SYMBOLS
        .iter()
        .find(|(code, _)| *code == symbol)
        .map(|(_, kind)| format!("{kind} Energy"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_export() {
        let content = r#"
Pokémon: 3
2 Sewaddle WHT 87
1 Iron Hands ex PAR 70

Trainer: 6
4 Ultra Ball
2 Ultra Ball

Energy: 51
51 Fire Energy

Total Cards: 60
"#;

        let deck = DeckLoader::parse_text(content).unwrap();
        assert_eq!(deck.pokemon.len(), 2);
        assert_eq!(deck.total_cards(), 60);

        assert_eq!(deck.pokemon[0].name, "Sewaddle");
        assert_eq!(deck.pokemon[0].set, "WHT");
        assert_eq!(deck.pokemon[0].number.as_str(), "87");
        assert_eq!(deck.pokemon[1].name, "Iron Hands ex");
        assert_eq!(deck.pokemon[1].quantity, 1);

        assert_eq!(deck.trainers.len(), 1);
        assert_eq!(deck.trainers["Ultra Ball"].quantity, 6);
        assert_eq!(deck.energies["Fire Energy"].quantity, 51);
    }

    #[test]
    fn test_parse_deck_builder_export_with_prints() {
        let content = "\
Pokémon: 4
4 Iron Hands ex PAR 70

Trainer: 8
4 Ultra Ball SVI 196
2 Boss's Orders PAL 172
2 Boss's Orders

Energy: 48
44 Basic {L} Energy SVE 4
4 Lightning Energy
";
        let deck = DeckLoader::parse_text(content).unwrap();
        assert_eq!(deck.total_cards(), 60);

        let trainers: Vec<&String> = deck.trainers.keys().collect();
        assert_eq!(trainers, vec!["Ultra Ball", "Boss's Orders"]);
        assert_eq!(deck.trainers["Boss's Orders"].quantity, 4);

        let energies: Vec<&String> = deck.energies.keys().collect();
        assert_eq!(energies, vec!["Lightning Energy"]);
        assert_eq!(deck.energies["Lightning Energy"].quantity, 48);
    }

    #[test]
    fn test_strip_print_keeps_plain_names() {
        assert_eq!(strip_print("Ultra Ball SVI 196"), "Ultra Ball");
        assert_eq!(strip_print("Neo Upper Energy TEF 162"), "Neo Upper Energy");
        assert_eq!(strip_print("Ultra Ball"), "Ultra Ball");
        assert_eq!(strip_print("Pokégear 3.0"), "Pokégear 3.0");
        assert_eq!(strip_print("Professor's Research"), "Professor's Research");
        assert_eq!(strip_print("Lost Vacuum LOR TG10"), "Lost Vacuum");
    }

    #[test]
    fn test_basic_energy_symbols() {
        assert_eq!(
            basic_energy_from_symbol("Basic {R} Energy").as_deref(),
            Some("Fire Energy")
        );
        assert_eq!(
            basic_energy_from_symbol("Basic {D} Energy").as_deref(),
            Some("Darkness Energy")
        );
        assert_eq!(basic_energy_from_symbol("Basic {X} Energy"), None);
        assert_eq!(basic_energy_from_symbol("Luminous Energy"), None);
    }

    #[test]
    fn test_section_headers_ignore_accents_and_case() {
        assert_eq!(section_header("Pokémon: 12"), Some(Section::Pokemon));
        assert_eq!(section_header("POKEMON:"), Some(Section::Pokemon));
        assert_eq!(section_header("Trainers: 30"), Some(Section::Trainer));
        assert_eq!(section_header("Energies: 8"), Some(Section::Energy));
        assert_eq!(section_header("Total Cards: 60"), None);
        assert_eq!(section_header("Pokémon: Catcher"), None);
    }

    #[test]
    fn test_pokemon_line_without_print_is_rejected() {
        let err = DeckLoader::parse_text("Pokémon: 1\n1 Sewaddle\n").unwrap_err();
        assert!(matches!(err, DeckcheckError::InvalidDeckFormat(_)));
    }

    #[test]
    fn test_card_before_header_is_rejected() {
        assert!(DeckLoader::parse_text("4 Ultra Ball\n").is_err());
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let err = DeckLoader::parse_text("# nothing here\n\nTotal Cards: 0\n").unwrap_err();
        assert_eq!(err.to_string(), "Invalid deck format: Empty deck");
    }

    #[test]
    fn test_parse_json() {
        let deck = DeckLoader::parse_json(
            r#"{
                "pokemon": [{"name": "Sewaddle", "set": "WHT", "number": 87, "quantity": 1}],
                "trainers": {},
                "energies": {"fire energy": {"quantity": 59}}
            }"#,
        )
        .unwrap();
        assert_eq!(deck.total_cards(), 60);
        assert!(DeckLoader::parse_json("not json").is_err());
    }
}
