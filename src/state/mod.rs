/// State management module
///
/// This module handles everything the vault keeps between calls:
/// - The photo data model (data.rs)
/// - Durable storage of the collection (store.rs)
/// - The in-memory collection and its write-through rules (collection.rs)
/// - Which photo is open for inspection (selection.rs)
/// - Unique id generation (ids.rs)
/// - Interfaces to the notifier, renderer and confirmation prompt (collaborators.rs)

pub mod collaborators;
pub mod collection;
pub mod data;
pub mod ids;
pub mod selection;
pub mod store;
