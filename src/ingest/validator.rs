use crate::state::data::FileDescriptor;

/// Content types the vault accepts
pub const ACCEPTED_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// Largest file the vault accepts (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Accepts or rejects candidate files by type and size.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileValidator;

impl FileValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, file: &FileDescriptor) -> bool {
        ACCEPTED_TYPES.contains(&file.mime_type.as_str()) && file.size <= MAX_FILE_SIZE
    }

    /// Split a batch into accepted files and the number rejected.
    pub fn partition(&self, files: Vec<FileDescriptor>) -> (Vec<FileDescriptor>, usize) {
        let total = files.len();
        let accepted: Vec<FileDescriptor> = files.into_iter().filter(|f| self.validate(f)).collect();
        let rejected = total - accepted.len();
        (accepted, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::FileContent;

    fn descriptor(mime_type: &str, size: u64) -> FileDescriptor {
        FileDescriptor {
            name: "file".to_string(),
            mime_type: mime_type.to_string(),
            size,
            content: FileContent::Bytes(Vec::new()),
        }
    }

    #[test]
    fn test_accepts_whitelisted_types() {
        let validator = FileValidator::new();
        for mime_type in ACCEPTED_TYPES {
            assert!(validator.validate(&descriptor(mime_type, 1024)), "{}", mime_type);
        }
    }

    #[test]
    fn test_rejects_other_types() {
        let validator = FileValidator::new();
        assert!(!validator.validate(&descriptor("image/tiff", 10)));
        assert!(!validator.validate(&descriptor("IMAGE/PNG", 10)));
        assert!(!validator.validate(&descriptor("", 10)));
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        let validator = FileValidator::new();
        assert!(validator.validate(&descriptor("image/png", MAX_FILE_SIZE)));
        assert!(!validator.validate(&descriptor("image/png", MAX_FILE_SIZE + 1)));
        assert!(validator.validate(&descriptor("image/png", 0)));
    }

    #[test]
    fn test_partition() {
        let files = vec![
            descriptor("image/png", 2 * 1024 * 1024),
            descriptor("image/jpeg", 12 * 1024 * 1024),
            descriptor("text/plain", 10),
        ];
        let (accepted, rejected) = FileValidator::new().partition(files);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].mime_type, "image/png");
        assert_eq!(rejected, 2);
    }
}
