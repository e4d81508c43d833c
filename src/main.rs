//! Review Sentiment Analyzer
//!
//! Analyze a CSV export of reviews and fetch the annotated spreadsheet.

use anyhow::Context;
use clap::{Parser, Subcommand};
use review_sentiment::{
    config::Config, table, AnalysisResponse, ArtifactStore, ErrorDocument, LexiconScorer,
    ReportAssembler,
};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "review-sentiment")]
#[command(about = "Sentiment reports for review and comment exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV file and print the report as JSON
    Analyze {
        /// Input CSV file
        file: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Copy an annotated spreadsheet out of the artifact directory
    Fetch {
        /// Artifact id (defaults to the most recent)
        #[arg(long)]
        id: Option<Uuid>,
        /// Destination file
        #[arg(short, long)]
        to: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    match cli.command {
        Commands::Analyze { file, pretty } => analyze(config, file, pretty),
        Commands::Fetch { id, to } => fetch(config, id, to),
    }
}

fn analyze(config: Config, file: PathBuf, pretty: bool) -> anyhow::Result<()> {
    let store = ArtifactStore::new(config.artifact.dir.clone());
    let assembler = ReportAssembler::new(LexiconScorer::new(), store, config.report);

    let response = match table::from_csv_path(&file) {
        Ok(table) => assembler.respond(&table),
        Err(e) => {
            tracing::error!("Failed to read {}: {}", file.display(), e);
            AnalysisResponse::Failure(ErrorDocument {
                error: e.to_string(),
            })
        }
    };

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", json);

    if let AnalysisResponse::Failure(doc) = response {
        anyhow::bail!(doc.error);
    }
    Ok(())
}

fn fetch(config: Config, id: Option<Uuid>, to: PathBuf) -> anyhow::Result<()> {
    let store = ArtifactStore::new(config.artifact.dir);
    let handle = match id {
        Some(id) => store.get(&id)?,
        None => store.latest()?,
    };

    let mut out = File::create(&to).with_context(|| format!("Failed to create {}", to.display()))?;
    let bytes = store.copy_to(&handle, &mut out)?;

    tracing::info!("Fetched artifact {} ({} bytes) to {}", handle.id, bytes, to.display());
    Ok(())
}
