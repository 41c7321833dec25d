/// Shared data structures for the photo vault
///
/// These structs represent the data model that flows between
/// the ingestion pipeline, the durable store and the presentation layer.

use std::path::PathBuf;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PhotoError, Result};

/// A single stored photo
///
/// The serialized shape (`id`, `name`, `data`, `type`, `size`, `uploadDate`)
/// is shared with existing backups and must not change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Unique within a collection, never reused
    pub id: String,
    /// Original file name, display only
    pub name: String,
    /// Self-contained `data:` URI with the image bytes
    pub data: String,
    /// MIME type of the original file (e.g., "image/png")
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Original file size in bytes
    pub size: u64,
    /// Written as `YYYY-MM-DDTHH:MM:SS.mmmZ`, always with milliseconds
    #[serde(with = "iso_millis")]
    pub upload_date: DateTime<Utc>,
}

/// Timestamps in the millisecond ISO-8601 form existing backups use.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

impl PhotoRecord {
    /// Decode the embedded payload back into the original bytes.
    pub fn decode_data(&self) -> Result<Vec<u8>> {
        decode_data_uri(&self.data)
    }
}

/// Where the bytes of a candidate file live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Already in memory (e.g., received from a drop target)
    Bytes(Vec<u8>),
    /// On disk, read lazily when the file is encoded
    Path(PathBuf),
}

/// A candidate file handed over by the input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    /// MIME type as reported by the source
    pub mime_type: String,
    /// Size in bytes as reported by the source
    pub size: u64,
    pub content: FileContent,
}

impl FileDescriptor {
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            content: FileContent::Bytes(bytes),
        }
    }
}

/// Display-ready fields of the photo under inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetails {
    pub index: usize,
    pub name: String,
    pub data: String,
    /// Human readable size (e.g., "1.5 MB")
    pub size_label: String,
    /// Human readable type (e.g., "PNG")
    pub type_label: String,
    /// Upload time in local time
    pub date_label: String,
}

/// A photo ready to be written out under its original name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A pretty-printed JSON backup of the whole collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `photos-backup-<YYYY-MM-DD>.json`
    pub file_name: String,
    pub contents: String,
}

/// Collection size information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    pub photo_count: usize,
    /// Size of the serialized value currently in the store
    pub stored_bytes: usize,
}

/// Build a `data:` URI from raw bytes.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Extract the bytes from a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let rest = uri.strip_prefix("data:").ok_or(PhotoError::InvalidDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(PhotoError::InvalidDataUri)?;
    if !header.ends_with(";base64") {
        return Err(PhotoError::InvalidDataUri);
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| PhotoError::InvalidDataUri)
}
