//! Photo vault: a local photo collection manager.
//!
//! Files are validated, encoded into self-contained data URIs and kept in an
//! ordered collection (most recent first) that is written through to a
//! durable key-value store after every change.

pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod ingest;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{PhotoError, Result};
pub use ingest::pipeline::{IngestOutcome, IngestionPipeline};
pub use state::collaborators::{Confirmer, Notifier, Renderer, Severity};
pub use state::collection::PhotoCollection;
pub use state::data::{FileContent, FileDescriptor, PhotoRecord};
pub use state::selection::SelectionState;
pub use state::store::{MemoryStore, PhotoStore, SqliteStore};
