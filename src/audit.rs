//! Auditing a directory of decklists
//!
//! Decklists are discovered with a parallel directory walk and checked in
//! parallel against every format. A file that can't be parsed is reported
//! alongside the others rather than skipped.

use crate::loader::{DataSnapshot, DeckLoader};
use crate::validate::{check_formats, FormatReport, FormatRules};
use crate::{DeckcheckError, Result};
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Extensions recognized as decklists
const DECK_EXTENSIONS: [&str; 2] = ["json", "txt"];

/// Outcome for one decklist file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Checked(FormatReport),
    Unreadable(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub path: PathBuf,
    pub outcome: AuditOutcome,
}

impl AuditEntry {
    /// Whether the file parsed and passed every format
    pub fn is_valid(&self) -> bool {
        matches!(&self.outcome, AuditOutcome::Checked(report) if report.all_valid())
    }
}

/// Find every decklist file under `dir`, sorted by path
pub fn discover_decklists(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DeckcheckError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Decklist directory not found: {dir:?}"),
        )));
    }

    let mut paths = Vec::new();
    for entry in jwalk::WalkDir::new(dir).skip_hidden(false) {
        let entry = entry.map_err(|e| {
            DeckcheckError::InvalidInput(format!("Error walking {}: {e}", dir.display()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_deck = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| DECK_EXTENSIONS.contains(&ext));
        if is_deck {
            paths.push(path);
        }
    }

    paths.sort();
    debug!("Found {} decklists under {}", paths.len(), dir.display());
    Ok(paths)
}

/// Check every decklist under `dir` against each format
pub fn audit_directory(dir: &Path, formats: &[FormatRules]) -> Result<Vec<AuditEntry>> {
    let paths = discover_decklists(dir)?;
    Ok(audit_files(&paths, formats))
}

/// Run `audit_directory` on the blocking pool against every format in `snapshot`
pub async fn audit_directory_async(
    dir: PathBuf,
    snapshot: DataSnapshot,
) -> Result<Vec<AuditEntry>> {
    tokio::task::spawn_blocking(move || audit_directory(&dir, snapshot.all_rules())).await?
}

/// Check the given decklist files in parallel, keeping input order
pub fn audit_files(paths: &[PathBuf], formats: &[FormatRules]) -> Vec<AuditEntry> {
    paths
        .par_iter()
        .map(|path| {
            let outcome = match DeckLoader::load_from_file(path) {
                Ok(deck) => AuditOutcome::Checked(check_formats(&deck, formats)),
                Err(e) => {
                    warn!("Could not read decklist {}: {e}", path.display());
                    AuditOutcome::Unreadable(e.to_string())
                }
            };
            AuditEntry {
                path: path.clone(),
                outcome,
            }
        })
        .collect()
}
