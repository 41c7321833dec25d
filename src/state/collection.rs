use chrono::Utc;
use tracing::{debug, error, info};

use super::collaborators::{Confirmer, Notifier, Renderer, Severity};
use super::data::{DownloadArtifact, ExportArtifact, PhotoDetails, PhotoRecord, StorageStats};
use super::ids::{IdGenerator, UuidIds};
use super::selection::SelectionState;
use super::store::PhotoStore;
use crate::display;
use crate::error::{PhotoError, Result};

/// The in-memory photo collection, most recent first.
///
/// Every mutation is written through to the store before the method
/// returns. A failed write is reported to the notifier and leaves the
/// in-memory collection authoritative; `is_persisted()` tells whether the
/// two currently agree.
pub struct PhotoCollection {
    photos: Vec<PhotoRecord>,
    selection: SelectionState,
    persisted: bool,
    store: Box<dyn PhotoStore>,
    ids: Box<dyn IdGenerator>,
    notifier: Box<dyn Notifier>,
    renderer: Box<dyn Renderer>,
    confirmer: Box<dyn Confirmer>,
}

impl PhotoCollection {
    /// Load the stored collection and render it once.
    pub fn load(
        store: Box<dyn PhotoStore>,
        notifier: Box<dyn Notifier>,
        renderer: Box<dyn Renderer>,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        let photos = store.load();
        info!("🖼️  Photo vault loaded with {} photos", photos.len());

        let collection = Self {
            photos,
            selection: SelectionState::None,
            persisted: true,
            store,
            ids: Box::new(UuidIds),
            notifier,
            renderer,
            confirmer,
        };
        collection.renderer.render(&collection.photos);
        collection
    }

    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.photos.iter().position(|photo| photo.id == id)
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Whether the last write to the store succeeded
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn stats(&self) -> StorageStats {
        StorageStats {
            photo_count: self.photos.len(),
            stored_bytes: self.store.stored_size(),
        }
    }

    /// Allocate an id that no record in the collection uses.
    pub fn next_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.position(&id).is_none() {
                return id;
            }
            debug!("Skipping id {} already present in the collection", id);
        }
    }

    pub(crate) fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.renderer.set_loading(loading);
    }

    pub(crate) fn refresh(&self) {
        self.renderer.render(&self.photos);
    }

    /// Write the whole collection to the store.
    fn persist(&mut self) {
        match self.store.save(&self.photos) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                error!("Failed to save photos: {}", e);
                self.persisted = false;
                self.notifier
                    .notify("Save failed, storage may be full", Severity::Error);
            }
        }
    }

    /// Prepend a record, persist and re-render.
    pub fn insert(&mut self, photo: PhotoRecord) -> Result<()> {
        if self.position(&photo.id).is_some() {
            return Err(PhotoError::DuplicateId(photo.id));
        }

        debug!("Inserting photo {} ({})", photo.id, photo.name);
        self.photos.insert(0, photo);
        // Existing indices moved up by one
        if let SelectionState::Index(index) = self.selection {
            self.selection = SelectionState::Index(index + 1);
        }

        self.persist();
        self.refresh();
        Ok(())
    }

    /// Remove the record at `index`. Out-of-range indices are ignored.
    pub fn delete_at(&mut self, index: usize) -> Option<PhotoRecord> {
        if index >= self.photos.len() {
            return None;
        }

        let photo = self.photos.remove(index);
        if self.selection.reconcile_removal(index) {
            self.renderer.hide_details();
        }

        self.persist();
        self.refresh();
        info!("🗑️  Deleted photo {} ({})", photo.id, photo.name);
        self.notifier
            .notify(&format!("Deleted photo \"{}\"", photo.name), Severity::Success);

        Some(photo)
    }

    /// Remove the record with `id`, if present.
    pub fn delete_by_id(&mut self, id: &str) -> Option<PhotoRecord> {
        let index = self.position(id)?;
        self.delete_at(index)
    }

    /// Open the photo at `index` for inspection.
    pub fn select(&mut self, index: usize) -> Option<PhotoDetails> {
        if !self.selection.select(index, self.photos.len()) {
            return None;
        }

        let details = display::photo_details(index, &self.photos[index]);
        self.renderer.show_details(&details);
        Some(details)
    }

    /// Close the detail view.
    pub fn close(&mut self) {
        self.selection.clear();
        self.renderer.hide_details();
    }

    pub fn selected(&self) -> Option<&PhotoRecord> {
        self.selection.current().and_then(|index| self.photos.get(index))
    }

    /// Decode the selected photo for saving under its original name.
    pub fn download_selected(&self) -> Option<DownloadArtifact> {
        let photo = self.selected()?;

        match photo.decode_data() {
            Ok(bytes) => {
                self.notifier.notify("Download started", Severity::Success);
                Some(DownloadArtifact {
                    file_name: photo.name.clone(),
                    bytes,
                })
            }
            Err(e) => {
                error!("Failed to decode photo {}: {}", photo.id, e);
                self.notifier.notify("Download failed", Severity::Error);
                None
            }
        }
    }

    /// Delete the selected photo once the user confirms.
    pub fn delete_selected(&mut self) -> Option<PhotoRecord> {
        let index = self.selection.current()?;
        let name = &self.photos.get(index)?.name;

        if !self
            .confirmer
            .confirm(&format!("Delete photo \"{}\"?", name))
        {
            return None;
        }

        let removed = self.delete_at(index);
        // delete_at already cleared the selection and hid the detail view
        if !self.selection.is_none() {
            self.close();
        }
        removed
    }

    /// Remove every photo once the user confirms.
    pub fn clear_all(&mut self) -> bool {
        if !self
            .confirmer
            .confirm("Clear all photos? This cannot be undone.")
        {
            return false;
        }

        let count = self.photos.len();
        self.photos.clear();
        if !self.selection.is_none() {
            self.close();
        }

        self.persist();
        self.refresh();
        info!("🧹 Cleared {} photos", count);
        self.notifier.notify("All photos cleared", Severity::Success);
        true
    }

    /// Pretty-printed JSON snapshot of the collection.
    pub fn export(&self) -> Result<ExportArtifact> {
        let contents = serde_json::to_string_pretty(&self.photos)?;
        let file_name = format!("photos-backup-{}.json", Utc::now().format("%Y-%m-%d"));

        self.notifier.notify("Backup export started", Severity::Success);
        Ok(ExportArtifact { file_name, contents })
    }
}

impl std::fmt::Debug for PhotoCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoCollection")
            .field("photos", &self.photos.len())
            .field("selection", &self.selection)
            .field("persisted", &self.persisted)
            .finish()
    }
}
