//! # aigrc CLI Entry Point
//!
//! Loads a compliance snapshot from a JSON file, runs the requested engine
//! operation, and prints the result as pretty JSON. Exit code 1 on invalid
//! input.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use aigrc_classify::classify;
use aigrc_controls::Catalog;
use aigrc_core::ComplianceSnapshot;
use aigrc_engine::recompute;
use aigrc_gaps::detect_gaps;
use aigrc_score::score;

/// aigrc — compliance engine for inventoried AI systems.
///
/// Classifies screening answers, resolves applicable controls, detects
/// gaps, and scores readiness from a point-in-time snapshot file.
#[derive(Parser, Debug)]
#[command(name = "aigrc", version, about)]
struct Cli {
    /// Path to a catalog JSON file; the built-in catalog when omitted.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Classify the snapshot's screening answers.
    Classify {
        /// Path to the snapshot JSON file.
        snapshot: PathBuf,
    },
    /// Detect gaps in the snapshot.
    Gaps {
        /// Path to the snapshot JSON file.
        snapshot: PathBuf,
    },
    /// Compute the general readiness score.
    Score {
        /// Path to the snapshot JSON file.
        snapshot: PathBuf,
    },
    /// Emit the full compliance report.
    Report {
        /// Path to the snapshot JSON file.
        snapshot: PathBuf,
    },
}

fn load_snapshot(path: &Path) -> anyhow::Result<ComplianceSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot file {}", path.display()))?;
    let snapshot: ComplianceSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot file {}", path.display()))?;
    snapshot
        .validate()
        .with_context(|| format!("validating snapshot file {}", path.display()))?;
    Ok(snapshot)
}

fn load_catalog(path: Option<&PathBuf>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing catalog file {}", path.display()))
        }
        None => Ok(Catalog::default()),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_ref())?;

    match cli.command {
        Commands::Classify { snapshot } => {
            let snapshot = load_snapshot(&snapshot)?;
            tracing::info!(subject = %snapshot.subject_id, "classifying snapshot");
            print_json(&classify(&snapshot.answers))?;
        }
        Commands::Gaps { snapshot } => {
            let snapshot = load_snapshot(&snapshot)?;
            print_json(&detect_gaps(&snapshot, &catalog))?;
        }
        Commands::Score { snapshot } => {
            let snapshot = load_snapshot(&snapshot)?;
            print_json(&score(&snapshot))?;
        }
        Commands::Report { snapshot } => {
            let snapshot = load_snapshot(&snapshot)?;
            print_json(&recompute(&snapshot, &catalog)?)?;
        }
    }

    Ok(())
}
