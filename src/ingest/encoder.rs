/// Binary to data URI conversion
///
/// Reads the bytes of an accepted file and turns them into a self-contained
/// `data:<type>;base64,...` string. Disk reads go through `tokio::fs`, the
/// base64 conversion runs on the blocking pool since photos can be large.

use tokio::task;

use super::validator::MAX_FILE_SIZE;
use crate::error::{PhotoError, Result};
use crate::state::data::{encode_data_uri, FileContent, FileDescriptor};

/// An encoded file, ready to become a stored photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    pub name: String,
    pub mime_type: String,
    /// Number of bytes actually read
    pub size: u64,
    /// `data:` URI with the file content
    pub data: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoEncoder;

impl PhotoEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode `file` into a data URI. Nothing is returned unless the
    /// whole blob was read and converted.
    ///
    /// The size limit is checked again on the bytes read, since a file on
    /// disk may have grown after it was described.
    pub async fn encode(&self, file: FileDescriptor) -> Result<EncodedFile> {
        let FileDescriptor {
            name,
            mime_type,
            content,
            ..
        } = file;

        let bytes = match content {
            FileContent::Bytes(bytes) => bytes,
            FileContent::Path(path) => tokio::fs::read(&path).await.map_err(|e| PhotoError::Encoding {
                name: name.clone(),
                reason: e.to_string(),
            })?,
        };

        let size = bytes.len() as u64;
        if size > MAX_FILE_SIZE {
            return Err(PhotoError::Encoding {
                name,
                reason: format!("{} bytes read, limit is {}", size, MAX_FILE_SIZE),
            });
        }

        let uri_type = mime_type.clone();
        let data = task::spawn_blocking(move || encode_data_uri(&uri_type, &bytes))
            .await
            .map_err(|e| PhotoError::Encoding {
                name: name.clone(),
                reason: format!("Task join error: {}", e),
            })?;

        Ok(EncodedFile {
            name,
            mime_type,
            size,
            data,
        })
    }
}
