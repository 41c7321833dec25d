//! Recording fakes shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::Result;
use crate::state::collaborators::{Confirmer, Notifier, Renderer, Severity};
use crate::state::collection::PhotoCollection;
use crate::state::data::{encode_data_uri, PhotoDetails, PhotoRecord};
use crate::state::ids::SequentialIds;
use crate::state::store::{MemoryStore, PhotoStore};

pub fn sample_record(id: &str, name: &str) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        name: name.to_string(),
        data: encode_data_uri("image/png", b"abc"),
        mime_type: "image/png".to_string(),
        size: 3,
        upload_date: "2024-01-01T12:00:00.000Z".parse().unwrap(),
    }
}

/// A store the test keeps a handle on after the collection takes ownership
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl PhotoStore for SharedStore {
    fn save(&mut self, photos: &[PhotoRecord]) -> Result<()> {
        self.0.borrow_mut().save(photos)
    }

    fn load(&self) -> Vec<PhotoRecord> {
        self.0.borrow().load()
    }

    fn stored_size(&self) -> usize {
        self.0.borrow().stored_size()
    }
}

#[derive(Default)]
pub struct Recorder {
    pub notifications: RefCell<Vec<(String, Severity)>>,
    pub renders: RefCell<Vec<usize>>,
    pub details: RefCell<Vec<String>>,
    pub hides: Cell<usize>,
    pub loading: RefCell<Vec<bool>>,
    pub prompts: RefCell<Vec<String>>,
    pub answer: Cell<bool>,
}

pub struct RecordingNotifier(Rc<Recorder>);

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.0.notifications.borrow_mut().push((message.to_string(), severity));
    }
}

pub struct RecordingRenderer(Rc<Recorder>);

impl Renderer for RecordingRenderer {
    fn render(&self, photos: &[PhotoRecord]) {
        self.0.renders.borrow_mut().push(photos.len());
    }

    fn show_details(&self, details: &PhotoDetails) {
        self.0.details.borrow_mut().push(details.name.clone());
    }

    fn hide_details(&self) {
        self.0.hides.set(self.0.hides.get() + 1);
    }

    fn set_loading(&self, loading: bool) {
        self.0.loading.borrow_mut().push(loading);
    }
}

pub struct ScriptedConfirmer(Rc<Recorder>);

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        self.0.prompts.borrow_mut().push(prompt.to_string());
        self.0.answer.get()
    }
}

/// Wires a collection to an in-memory store and recording collaborators.
pub struct Harness {
    pub store: Rc<RefCell<MemoryStore>>,
    pub recorder: Rc<Recorder>,
}

impl Harness {
    pub fn new() -> Self {
        let recorder = Recorder::default();
        recorder.answer.set(true);
        Self {
            store: Rc::new(RefCell::new(MemoryStore::new())),
            recorder: Rc::new(recorder),
        }
    }

    pub fn with_photos(photos: Vec<PhotoRecord>) -> Self {
        let harness = Self::new();
        harness.store.borrow_mut().save(&photos).unwrap();
        harness
    }

    pub fn collection(&self) -> PhotoCollection {
        PhotoCollection::load(
            Box::new(SharedStore(Rc::clone(&self.store))),
            Box::new(RecordingNotifier(Rc::clone(&self.recorder))),
            Box::new(RecordingRenderer(Rc::clone(&self.recorder))),
            Box::new(ScriptedConfirmer(Rc::clone(&self.recorder))),
        )
        .with_id_generator(Box::new(SequentialIds::new()))
    }

    pub fn answer(&self, yes: bool) {
        self.recorder.answer.set(yes);
    }

    pub fn notifications(&self) -> Vec<(String, Severity)> {
        self.recorder.notifications.borrow().clone()
    }

    pub fn renders(&self) -> Vec<usize> {
        self.recorder.renders.borrow().clone()
    }

    pub fn details_shown(&self) -> Vec<String> {
        self.recorder.details.borrow().clone()
    }

    pub fn hides(&self) -> usize {
        self.recorder.hides.get()
    }

    pub fn loading(&self) -> Vec<bool> {
        self.recorder.loading.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.recorder.prompts.borrow().clone()
    }
}
