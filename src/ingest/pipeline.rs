use chrono::{SubsecRound, Utc};
use tracing::{error, info};

use super::encoder::PhotoEncoder;
use super::validator::FileValidator;
use crate::state::collaborators::Severity;
use crate::state::collection::PhotoCollection;
use crate::state::data::{FileDescriptor, PhotoRecord};

/// Result of ingesting one batch of files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Nothing passed validation; the collection was not touched
    NoValidFiles { rejected: usize },
    /// Every accepted file was added
    Completed { ingested: usize, rejected: usize },
    /// An encode failed; files added before it are kept
    Aborted {
        ingested: usize,
        rejected: usize,
        reason: String,
    },
}

impl IngestOutcome {
    pub fn ingested(&self) -> usize {
        match self {
            IngestOutcome::NoValidFiles { .. } => 0,
            IngestOutcome::Completed { ingested, .. } | IngestOutcome::Aborted { ingested, .. } => {
                *ingested
            }
        }
    }
}

/// Validate, encode and insert a batch of files.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestionPipeline {
    validator: FileValidator,
    encoder: PhotoEncoder,
}

impl IngestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files are processed one at a time, in the order given; each insert
    /// is persisted before the next file is read.
    pub async fn ingest(
        &self,
        collection: &mut PhotoCollection,
        files: Vec<FileDescriptor>,
    ) -> IngestOutcome {
        let (accepted, rejected) = self.validator.partition(files);

        if accepted.is_empty() {
            collection.notify("Please choose valid image files", Severity::Error);
            return IngestOutcome::NoValidFiles { rejected };
        }

        if rejected > 0 {
            collection.notify(
                "Some files are unsupported or exceed the size limit",
                Severity::Error,
            );
        }

        collection.set_loading(true);
        let mut ingested = 0;
        let mut failure = None;

        for file in accepted {
            let encoded = match self.encoder.encode(file).await {
                Ok(encoded) => encoded,
                Err(e) => {
                    error!("Upload error: {}", e);
                    failure = Some(e.to_string());
                    break;
                }
            };

            let photo = PhotoRecord {
                id: collection.next_id(),
                name: encoded.name,
                data: encoded.data,
                mime_type: encoded.mime_type,
                size: encoded.size,
                upload_date: Utc::now().trunc_subsecs(3),
            };

            // next_id() never returns an id already in the collection
            if let Err(e) = collection.insert(photo) {
                error!("Upload error: {}", e);
                failure = Some(e.to_string());
                break;
            }
            ingested += 1;
        }

        collection.refresh();
        collection.set_loading(false);

        match failure {
            None => {
                info!("✅ Ingested {} photos ({} rejected)", ingested, rejected);
                collection.notify(
                    &format!("Uploaded {} photo(s)", ingested),
                    Severity::Success,
                );
                IngestOutcome::Completed { ingested, rejected }
            }
            Some(reason) => {
                collection.notify("Upload failed, please try again", Severity::Error);
                IngestOutcome::Aborted {
                    ingested,
                    rejected,
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::FileContent;
    use crate::state::store::PhotoStore;
    use crate::testing::{sample_record, Harness};

    const MIB: usize = 1024 * 1024;

    fn png(name: &str, len: usize) -> FileDescriptor {
        FileDescriptor::from_bytes(name, "image/png", vec![7u8; len])
    }

    fn unreadable(name: &str) -> FileDescriptor {
        FileDescriptor {
            name: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            size: 10,
            content: FileContent::Path("/nonexistent/photo.jpg".into()),
        }
    }

    #[tokio::test]
    async fn test_oversized_jpeg_is_skipped() {
        let harness = Harness::new();
        let mut collection = harness.collection();
        let files = vec![
            png("small.png", 2 * MIB),
            FileDescriptor::from_bytes("huge.jpg", "image/jpeg", vec![0u8; 12 * MIB]),
        ];

        let outcome = IngestionPipeline::new().ingest(&mut collection, files).await;

        assert_eq!(outcome, IngestOutcome::Completed { ingested: 1, rejected: 1 });
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.photos()[0].name, "small.png");
        assert_eq!(collection.photos()[0].size, (2 * MIB) as u64);
        assert_eq!(harness.store.borrow().load(), collection.photos());

        let notifications = harness.notifications();
        let advisories = notifications
            .iter()
            .filter(|(m, _)| m == "Some files are unsupported or exceed the size limit")
            .count();
        assert_eq!(advisories, 1);
        assert_eq!(
            notifications.last(),
            Some(&("Uploaded 1 photo(s)".to_string(), Severity::Success))
        );
    }

    #[tokio::test]
    async fn test_partial_rejection_ingests_the_rest() {
        let harness = Harness::new();
        let mut collection = harness.collection();
        let files = vec![
            png("a.png", 4),
            FileDescriptor::from_bytes("b.bmp", "image/bmp", vec![1]),
            png("c.png", 4),
            FileDescriptor::from_bytes("d.txt", "text/plain", vec![1]),
            png("e.png", 4),
        ];

        let outcome = IngestionPipeline::new().ingest(&mut collection, files).await;

        assert_eq!(outcome.ingested(), 3);
        let names: Vec<_> = collection.photos().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["e.png", "c.png", "a.png"]);
        let errors = harness
            .notifications()
            .iter()
            .filter(|(_, s)| *s == Severity::Error)
            .count();
        assert_eq!(errors, 1);
    }

    #[tokio::test]
    async fn test_no_valid_files() {
        let harness = Harness::with_photos(vec![sample_record("x", "old.png")]);
        let mut collection = harness.collection();
        let files = vec![FileDescriptor::from_bytes("doc.pdf", "application/pdf", vec![1])];

        let outcome = IngestionPipeline::new().ingest(&mut collection, files).await;

        assert_eq!(outcome, IngestOutcome::NoValidFiles { rejected: 1 });
        assert_eq!(collection.len(), 1);
        assert!(harness.loading().is_empty());
        assert_eq!(
            harness.notifications(),
            vec![("Please choose valid image files".to_string(), Severity::Error)]
        );
    }

    #[tokio::test]
    async fn test_empty_batch_reports_no_valid_files() {
        let harness = Harness::new();
        let mut collection = harness.collection();
        let outcome = IngestionPipeline::new().ingest(&mut collection, Vec::new()).await;
        assert_eq!(outcome, IngestOutcome::NoValidFiles { rejected: 0 });
    }

    #[tokio::test]
    async fn test_encode_failure_keeps_earlier_inserts() {
        let harness = Harness::new();
        let mut collection = harness.collection();
        let files = vec![png("first.png", 4), unreadable("broken.jpg"), png("never.png", 4)];

        let outcome = IngestionPipeline::new().ingest(&mut collection, files).await;

        assert!(matches!(outcome, IngestOutcome::Aborted { ingested: 1, rejected: 0, .. }));
        assert_eq!(collection.len(), 1);
        assert_eq!(harness.store.borrow().load().len(), 1);
        assert_eq!(collection.photos()[0].name, "first.png");
        assert_eq!(harness.store.borrow().load(), collection.photos());
        assert_eq!(harness.loading(), vec![true, false]);
        assert_eq!(
            harness.notifications(),
            vec![("Upload failed, please try again".to_string(), Severity::Error)]
        );
    }

    #[tokio::test]
    async fn test_records_get_fresh_ids_and_metadata() {
        let harness = Harness::with_photos(vec![sample_record("photo-1", "old.png")]);
        let mut collection = harness.collection();

        IngestionPipeline::new()
            .ingest(&mut collection, vec![png("new.png", 3)])
            .await;

        let photo = &collection.photos()[0];
        assert_eq!(photo.id, "photo-2");
        assert_eq!(photo.mime_type, "image/png");
        assert_eq!(photo.data, "data:image/png;base64,BwcH");
        assert_eq!(photo.upload_date.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(collection.photos()[1].id, "photo-1");
    }
}
