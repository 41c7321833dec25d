/// Build file descriptors from paths on disk
///
/// Directories are walked recursively; every regular file found becomes a
/// candidate. Acceptance is left to the validator.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::state::data::{FileContent, FileDescriptor};

/// Guess a MIME type from the file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}

/// Describe a single file without reading its content.
pub fn describe_file(path: &Path) -> Result<FileDescriptor> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(FileDescriptor {
        name,
        mime_type: mime_type_for(path).to_string(),
        size: metadata.len(),
        content: FileContent::Path(path.to_path_buf()),
    })
}

/// Collect descriptors for files and folders given on the command line.
pub fn collect_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FileDescriptor>> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            files.push(describe_file(path)?);
            continue;
        }

        debug!("🔍 Scanning folder: {}", path.display());
        let mut entries: Vec<_> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .collect();
        entries.sort_by(|a, b| a.path().cmp(b.path()));

        for entry in entries {
            files.push(describe_file(entry.path())?);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("b.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("c.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("d.gif")), "image/gif");
        assert_eq!(mime_type_for(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_type_for(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn test_collect_walks_folders() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("trip")).unwrap();
        std::fs::write(dir.path().join("trip").join("beach.png"), b"12345").unwrap();
        std::fs::write(dir.path().join("cover.gif"), b"12").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hi").unwrap();

        let files = collect_files(&[dir.path()]).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["cover.gif", "notes.txt", "beach.png"]);

        let beach = &files[2];
        assert_eq!(beach.mime_type, "image/png");
        assert_eq!(beach.size, 5);
        assert!(matches!(&beach.content, FileContent::Path(p) if p.ends_with("trip/beach.png")));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(collect_files(&["/nonexistent/photo.png"]).is_err());
    }
}
