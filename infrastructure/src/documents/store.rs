//! Filesystem store for uploaded documents
//!
//! Attachments are written under one directory per module, with a
//! timestamp prefix so repeated uploads of the same filename never
//! collide. Only the resulting [`AttachmentRef`] travels further into
//! the system.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use estate_domain::{AttachmentRef, ModuleId};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to store document '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Stores uploaded files under `{root}/{module_id}/`
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist one uploaded file and return its reference
    pub fn save(
        &self,
        module: &ModuleId,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<AttachmentRef, StoreError> {
        let dir = self.root.join(module.as_str());
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            name: original_name.to_string(),
            source,
        })?;

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("{}_{}", stamp, sanitize(original_name)));
        fs::write(&path, bytes).map_err(|source| StoreError::Io {
            name: original_name.to_string(),
            source,
        })?;

        info!(module = %module, path = %path.display(), size = bytes.len(), "Document stored");
        Ok(AttachmentRef::new(
            original_name,
            path.to_string_lossy(),
            bytes.len() as u64,
        ))
    }
}

/// Keep filenames shell- and path-safe
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_places_file_under_module_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        let attachment = store
            .save(&ModuleId::from("module1"), "deed.pdf", b"pdf bytes")
            .unwrap();

        assert_eq!(attachment.original_name, "deed.pdf");
        assert_eq!(attachment.size_bytes, 9);
        assert!(attachment.stored_path.contains("module1"));
        assert!(attachment.stored_path.ends_with("_deed.pdf"));
        assert_eq!(fs::read(&attachment.stored_path).unwrap(), b"pdf bytes");
    }

    #[test]
    fn test_save_sanitizes_hostile_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        let attachment = store
            .save(&ModuleId::from("module6"), "../../etc/passwd", b"x")
            .unwrap();

        // Separators are flattened, so the file stays inside the module dir
        assert!(attachment.stored_path.ends_with("_.._.._etc_passwd"));
        let stored = std::path::Path::new(&attachment.stored_path);
        assert_eq!(stored.parent().unwrap(), dir.path().join("module6"));
        assert!(stored.exists());
    }
}
