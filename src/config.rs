//! Data directory layout
//!
//! The sync jobs that scrape legality data leave their snapshots in one
//! directory, one file per concern.

use crate::core::Format;
use std::path::{Path, PathBuf};

pub const STANDARD_CARDS_FILE: &str = "legal_cards.json";
pub const EXPANDED_CARDS_FILE: &str = "legal_expanded_cards.json";
pub const BANNED_CARDS_FILE: &str = "banned_cards.json";
pub const BANNED_FEED_FILE: &str = "banned_feed.json";
pub const SET_CODES_FILE: &str = "card_sets.json";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Paths of every snapshot file inside a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DataPaths {
            data_dir: data_dir.into(),
        }
    }

    /// Legal card export for a format
    pub fn legal_cards(&self, format: Format) -> PathBuf {
        match format {
            Format::Standard => self.data_dir.join(STANDARD_CARDS_FILE),
            Format::Expanded => self.data_dir.join(EXPANDED_CARDS_FILE),
        }
    }

    pub fn banned_cards(&self) -> PathBuf {
        self.data_dir.join(BANNED_CARDS_FILE)
    }

    pub fn banned_feed(&self) -> PathBuf {
        self.data_dir.join(BANNED_FEED_FILE)
    }

    pub fn set_codes(&self) -> PathBuf {
        self.data_dir.join(SET_CODES_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths::new(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_inside_data_dir() {
        let paths = DataPaths::new("/srv/deckcheck");
        assert_eq!(
            paths.legal_cards(Format::Standard),
            PathBuf::from("/srv/deckcheck/legal_cards.json")
        );
        assert_eq!(
            paths.legal_cards(Format::Expanded),
            PathBuf::from("/srv/deckcheck/legal_expanded_cards.json")
        );
        assert_eq!(paths.banned_cards(), PathBuf::from("/srv/deckcheck/banned_cards.json"));
        assert_eq!(paths.set_codes(), PathBuf::from("/srv/deckcheck/card_sets.json"));
    }

    #[test]
    fn test_default_data_dir() {
        assert_eq!(DataPaths::default().data_dir(), Path::new("data"));
    }
}
