/// Interfaces to the outside world
///
/// The collection never talks to a screen or a user directly. It is handed
/// these collaborators at construction time:
/// - a notification sink for `(message, severity)` pairs
/// - a renderer that receives the full ordered collection after each change
/// - a yes/no gate consulted before destructive operations

use super::data::{PhotoDetails, PhotoRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

pub trait Renderer {
    /// Redraw the grid; the photo count is `photos.len()`.
    fn render(&self, photos: &[PhotoRecord]);

    /// Open the detail view for a single photo.
    fn show_details(&self, _details: &PhotoDetails) {}

    fn hide_details(&self) {}

    /// Toggle the busy indicator shown while a batch is ingested.
    fn set_loading(&self, _loading: bool) {}
}

pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> bool;
}
