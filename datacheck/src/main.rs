use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use songsim_core::catalog::{load_catalog, Catalog};
use songsim_core::RetrievalSet;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "datacheck")]
#[command(about = "Validate song metadata and retrieval result files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every retrieval candidate resolves in the catalog
    Check {
        /// Path to the song metadata file
        #[arg(long, default_value = "./db/songMeta.json")]
        meta: String,
        /// Directory of precomputed retrieval result files
        #[arg(long, default_value = "./db/retrievals")]
        retrievals: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { meta, retrievals } => check(&meta, &retrievals),
    }
}

fn check(meta: &str, retrievals_dir: &str) -> Result<()> {
    let catalog = load_catalog(meta)?;
    tracing::info!(songs = catalog.len(), "catalog ok");

    let (sets, errors) = songsim_core::retrievals::load_retrievals(retrievals_dir);
    for e in &errors {
        tracing::error!(file = %e.file, "load failed: {:#}", e.error);
    }

    let mut dangling = 0usize;
    for (name, set) in &sets {
        dangling += check_set(&catalog, name, set);
    }

    if !errors.is_empty() || dangling > 0 {
        bail!(
            "{} unreadable file(s), {} dangling candidate id(s)",
            errors.len(),
            dangling
        );
    }
    tracing::info!(retrievals = sets.len(), "all retrieval candidates resolve");
    Ok(())
}

/// Returns the number of candidate ids in `set` with no catalog record.
/// Unknown source keys are only warned about: they are never rendered, but
/// usually mean the retrieval was computed against a different catalog.
fn check_set(catalog: &Catalog, name: &str, set: &RetrievalSet) -> usize {
    let mut missing = 0usize;
    for (source, ranked) in set {
        if catalog.get(source).is_none() {
            tracing::warn!(retrieval = %name, source = %source, "source id not in catalog");
        }
        for (candidate, _) in ranked {
            if catalog.get(candidate).is_none() {
                tracing::error!(retrieval = %name, source = %source, candidate = %candidate, "unknown candidate");
                missing += 1;
            }
        }
    }
    tracing::info!(retrieval = %name, sources = set.len(), missing, "checked");
    missing
}
