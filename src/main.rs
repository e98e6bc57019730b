//! deckcheck - Pokémon TCG decklist legality checker

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use pkmn_deckcheck::{
    audit::{audit_directory_async, AuditEntry, AuditOutcome},
    config::{DataPaths, DEFAULT_DATA_DIR},
    core::{Format, SetCodes},
    loader::{
        banned::parse_banned_feed, convert_banned_cards, write_banned_cards, DataSnapshot,
        DeckLoader, RawCardDatabase,
    },
    validate::{check_formats, FormatReport, FormatRules},
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Which formats to check a deck against
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Standard,
    Expanded,
    /// Every format, standard first
    All,
}

impl FormatArg {
    fn formats(self) -> Vec<Format> {
        match self {
            FormatArg::Standard => vec![Format::Standard],
            FormatArg::Expanded => vec![Format::Expanded],
            FormatArg::All => Format::ALL.to_vec(),
        }
    }
}

#[derive(Parser)]
#[command(name = "deckcheck")]
#[command(about = "Pokémon TCG decklist legality checker", long_about = None)]
struct Cli {
    /// Directory holding the legal card, banned card and set code snapshots
    #[arg(long, global = true, env = "DECKCHECK_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Drop every card of this set from the legal pools (repeatable)
    #[arg(long = "exclude-set", global = true, value_name = "SET_CODE")]
    exclude_sets: Vec<String>,

    /// Log debug output (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a decklist (.json or text export) for legality
    Check {
        /// Decklist file
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Format(s) to check against
        #[arg(long, value_enum, default_value = "all")]
        format: FormatArg,

        /// Only check deck size, Pokémon count and copy limits
        #[arg(long)]
        construction_only: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a decklist grouped by category
    Show {
        /// Decklist file
        #[arg(value_name = "DECK")]
        deck: PathBuf,
    },

    /// Convert a banned card announcement feed into banned_cards.json
    ConvertBanned {
        /// Raw feed (default: <data-dir>/banned_feed.json)
        #[arg(long)]
        feed: Option<PathBuf>,

        /// Set name to code mapping (default: <data-dir>/card_sets.json)
        #[arg(long)]
        sets: Option<PathBuf>,

        /// Expanded legal card export (default: <data-dir>/legal_expanded_cards.json)
        #[arg(long)]
        expanded: Option<PathBuf>,

        /// Output file (default: <data-dir>/banned_cards.json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Check every decklist under a directory
    Audit {
        /// Directory to search for .json and .txt decklists
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let paths = DataPaths::new(&cli.data_dir);

    match cli.command {
        Commands::Check {
            deck,
            format,
            construction_only,
            json,
        } => run_check(&paths, &cli.exclude_sets, deck, format, construction_only, json).await,
        Commands::Show { deck } => {
            let decklist = DeckLoader::load_from_file(&deck)
                .with_context(|| format!("Failed to load decklist {}", deck.display()))?;
            println!("{decklist}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::ConvertBanned {
            feed,
            sets,
            expanded,
            output,
        } => {
            run_convert_banned(
                feed.unwrap_or_else(|| paths.banned_feed()),
                sets.unwrap_or_else(|| paths.set_codes()),
                expanded.unwrap_or_else(|| paths.legal_cards(Format::Expanded)),
                output.unwrap_or_else(|| paths.banned_cards()),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Audit { dir, json } => run_audit(&paths, &cli.exclude_sets, dir, json).await,
    }
}

async fn run_check(
    paths: &DataPaths,
    exclude_sets: &[String],
    deck_path: PathBuf,
    format: FormatArg,
    construction_only: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let deck = DeckLoader::load_from_file(&deck_path)
        .with_context(|| format!("Failed to load decklist {}", deck_path.display()))?;

    let rules: Vec<FormatRules> = if construction_only {
        format.formats().into_iter().map(FormatRules::new).collect()
    } else {
        let snapshot = DataSnapshot::load(paths, exclude_sets)
            .await
            .with_context(|| format!("Failed to load legality data from {}", paths.data_dir().display()))?;
        format
            .formats()
            .into_iter()
            .filter_map(|f| snapshot.rules(f).cloned())
            .collect()
    };

    let report = check_formats(&deck, &rules);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Deck check complete:\n{}", describe_report(&report));
    }

    Ok(if report.all_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_convert_banned(
    feed_path: PathBuf,
    sets_path: PathBuf,
    expanded_path: PathBuf,
    output_path: PathBuf,
) -> anyhow::Result<()> {
    let feed_content = std::fs::read_to_string(&feed_path)
        .with_context(|| format!("Failed to read banned feed {}", feed_path.display()))?;
    let feed = parse_banned_feed(&feed_content)?;
    let sets = SetCodes::load_from_file(&sets_path)
        .with_context(|| format!("Failed to load set codes {}", sets_path.display()))?;
    let expanded = RawCardDatabase::load_from_file(&expanded_path)
        .with_context(|| format!("Failed to load expanded cards {}", expanded_path.display()))?;

    let converted = convert_banned_cards(&feed, &sets, &expanded)?;
    write_banned_cards(&output_path, &converted)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(
        "Wrote banned cards for {} format(s) to {}",
        converted.len(),
        output_path.display()
    );
    Ok(())
}

async fn run_audit(
    paths: &DataPaths,
    exclude_sets: &[String],
    dir: PathBuf,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let snapshot = DataSnapshot::load(paths, exclude_sets)
        .await
        .with_context(|| format!("Failed to load legality data from {}", paths.data_dir().display()))?;

    let entries = audit_directory_async(dir, snapshot).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{}", describe_entry(entry));
        }
        let valid = entries.iter().filter(|e| e.is_valid()).count();
        println!("\n{valid}/{} decklists valid", entries.len());
    }

    Ok(if entries.iter().all(AuditEntry::is_valid) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn describe_report(report: &FormatReport) -> String {
    report
        .results
        .iter()
        .map(|(format, result)| {
            if result.valid {
                format!("- {format} valid!")
            } else {
                format!("- {format} not valid! {}", result.error)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_entry(entry: &AuditEntry) -> String {
    match &entry.outcome {
        AuditOutcome::Checked(report) => {
            format!("{}:\n{}", entry.path.display(), describe_report(report))
        }
        AuditOutcome::Unreadable(error) => {
            format!("{}:\n- error checking deck: {error}", entry.path.display())
        }
    }
}
