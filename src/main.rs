use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use photo_vault::console::{ConsoleNotifier, ConsoleRenderer, PromptConfirmer};
use photo_vault::ingest::source;
use photo_vault::{Config, IngestOutcome, IngestionPipeline, PhotoCollection, SqliteStore};

/// Keep your photos in a local vault
#[derive(Debug, Parser)]
#[command(name = "photo-vault", version, about)]
struct Cli {
    /// Database file (defaults to the user data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add image files, or every file in the given folders
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List stored photos, most recent first
    List,
    /// Show details of the photo at INDEX
    Show { index: usize },
    /// Save the photo at INDEX under its original name
    Download {
        index: usize,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Delete the photo at INDEX after confirmation
    Delete {
        index: usize,
        #[arg(long, short)]
        yes: bool,
    },
    /// Delete the photo with the given id
    Remove { id: String },
    /// Delete every photo after confirmation
    Clear {
        #[arg(long, short)]
        yes: bool,
    },
    /// Write a JSON backup of the whole collection
    Export {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Show photo count and storage usage
    Stats,
}

fn open_collection(config: &Config, show_grid: bool, assume_yes: bool) -> anyhow::Result<PhotoCollection> {
    let store = SqliteStore::open(config)
        .with_context(|| format!("Failed to open database at {}", config.db_path.display()))?;

    Ok(PhotoCollection::load(
        Box::new(store),
        Box::new(ConsoleNotifier::stdout()),
        Box::new(ConsoleRenderer::stdout(show_grid)),
        Box::new(PromptConfirmer::stdin(assume_yes)),
    ))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("photo_vault=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }

    match cli.command {
        Command::Add { paths } => {
            let files = source::collect_files(paths.as_slice())?;
            let mut collection = open_collection(&config, false, false)?;
            let outcome = IngestionPipeline::new().ingest(&mut collection, files).await;
            if let IngestOutcome::Aborted { reason, .. } = &outcome {
                bail!("Upload stopped after {} photos: {}", outcome.ingested(), reason);
            }
        }
        Command::List => {
            open_collection(&config, true, false)?;
        }
        Command::Show { index } => {
            let mut collection = open_collection(&config, false, false)?;
            if collection.select(index).is_none() {
                bail!("No photo at index {}", index);
            }
        }
        Command::Download { index, out } => {
            let mut collection = open_collection(&config, false, false)?;
            if collection.select(index).is_none() {
                bail!("No photo at index {}", index);
            }
            if let Some(artifact) = collection.download_selected() {
                let path = out.join(&artifact.file_name);
                std::fs::write(&path, &artifact.bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{}", path.display());
            }
            collection.close();
        }
        Command::Delete { index, yes } => {
            let mut collection = open_collection(&config, false, yes)?;
            if collection.select(index).is_none() {
                bail!("No photo at index {}", index);
            }
            if collection.delete_selected().is_none() {
                collection.close();
            }
        }
        Command::Remove { id } => {
            let mut collection = open_collection(&config, false, false)?;
            if collection.delete_by_id(&id).is_none() {
                bail!("No photo with id {}", id);
            }
        }
        Command::Clear { yes } => {
            let mut collection = open_collection(&config, false, yes)?;
            collection.clear_all();
        }
        Command::Export { out } => {
            let collection = open_collection(&config, false, false)?;
            let artifact = collection.export()?;
            let path = out.join(&artifact.file_name);
            std::fs::write(&path, &artifact.contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        Command::Stats => {
            let collection = open_collection(&config, false, false)?;
            let stats = collection.stats();
            println!("Photos:  {}", stats.photo_count);
            println!(
                "Storage: {}",
                photo_vault::display::format_file_size(stats.stored_bytes as u64)
            );
            println!("Database: {}", config.db_path.display());
        }
    }

    Ok(())
}
