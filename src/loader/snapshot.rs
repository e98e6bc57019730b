//! Loading every format's reference data at once
//!
//! Both legal card exports and the banned list are read concurrently. The
//! result is an immutable snapshot: a resync builds a new one rather than
//! touching the old.

use crate::config::DataPaths;
use crate::core::Format;
use crate::loader::banned::{parse_banned_cards, BannedCardsByFormat};
use crate::loader::database::LegalCardPool;
use crate::validate::FormatRules;
use crate::Result;
use log::{info, warn};
use std::path::Path;

/// Reference data for every format
#[derive(Debug, Clone)]
pub struct DataSnapshot {
    formats: Vec<FormatRules>,
}

impl DataSnapshot {
    /// Load both card pools and the banned list from a data directory
    ///
    /// A missing pool is an error. A missing banned-list file, or a format
    /// absent from it, means that format has no banned cards.
    pub async fn load(paths: &DataPaths, banned_sets: &[String]) -> Result<Self> {
        let standard_path = paths.legal_cards(Format::Standard);
        let expanded_path = paths.legal_cards(Format::Expanded);
        let banned_path = paths.banned_cards();

        let (standard, expanded, banned) = tokio::join!(
            LegalCardPool::load_from_file_async(&standard_path, banned_sets),
            LegalCardPool::load_from_file_async(&expanded_path, banned_sets),
            load_banned_async(&banned_path),
        );
        let mut banned = banned?;

        let mut formats = Vec::with_capacity(Format::ALL.len());
        for (format, pool) in [(Format::Standard, standard?), (Format::Expanded, expanded?)] {
            info!(
                "Loaded {format} pool: {} Pokémon, {} Trainers, {} Energies",
                pool.pokemon_len(),
                pool.trainers.len(),
                pool.energies.len()
            );
            let mut rules = FormatRules::new(format).with_legal(pool);
            match banned.as_mut().and_then(|b| b.shift_remove(format.as_str())) {
                Some(list) => rules = rules.with_banned(list),
                None => warn!("No banned list for {format}"),
            }
            formats.push(rules);
        }

        Ok(DataSnapshot { formats })
    }

    /// Build a snapshot from already loaded rules
    pub fn from_rules(formats: Vec<FormatRules>) -> Self {
        DataSnapshot { formats }
    }

    pub fn rules(&self, format: Format) -> Option<&FormatRules> {
        self.formats.iter().find(|rules| rules.format == format)
    }

    pub fn all_rules(&self) -> &[FormatRules] {
        &self.formats
    }
}

async fn load_banned_async(path: &Path) -> Result<Option<BannedCardsByFormat>> {
    if !tokio::fs::try_exists(path).await? {
        warn!("Banned list {} not found, checking without bans", path.display());
        return Ok(None);
    }
    let content = tokio::fs::read_to_string(path).await?;
    parse_banned_cards(&content).map(Some)
}
