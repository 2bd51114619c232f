//! On-disk document store.
//!
//! Documents are plain markdown files under a single storage root, one file
//! per document, named `<name>.md`, with document identity equal to the file
//! name minus its extension. The catalog is never persisted; [`DocumentStore::list`]
//! recomputes it from the directory on every call.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use markdrop_shared::{DOCUMENT_EXTENSION, DocumentEntry, DocumentName, MarkdropError, Result};

/// Handle over one storage root directory.
///
/// There is no locking: concurrent writes to the same name race, and the
/// last completed rename wins.
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open the store, creating the root directory if it does not exist.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| MarkdropError::io(&root, e))?;
        info!(root = %root.display(), "document store opened");
        Ok(Self { root })
    }

    /// Storage root this store reads and writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk path of the stored file for `name`. Stays inside the root
    /// because `DocumentName` cannot carry separators or `..`.
    pub fn document_path(&self, name: &DocumentName) -> PathBuf {
        self.root.join(name.file_name())
    }

    /// Enumerate the catalog: every stored document, sorted by name.
    ///
    /// Files without the document extension, or whose stem is not a valid
    /// document name, are skipped rather than treated as errors.
    pub async fn list(&self) -> Result<Vec<DocumentEntry>> {
        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| MarkdropError::io(&self.root, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| MarkdropError::io(&self.root, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let name = match DocumentName::new(stem) {
                Ok(name) => name,
                Err(_) => {
                    debug!(file = %path.display(), "skipping file with unusable name");
                    continue;
                }
            };
            let modified = entry
                .metadata()
                .await
                .ok()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Utc>::from);
            entries.push(DocumentEntry { name, modified });
        }

        entries.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(entries)
    }

    /// Read the raw markdown content of a stored document.
    pub async fn read(&self, name: &DocumentName) -> Result<String> {
        let path = self.document_path(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MarkdropError::not_found(name.as_str()))
            }
            Err(e) => Err(MarkdropError::io(path, e)),
        }
    }

    /// Persist `bytes` as the document `name`, silently replacing any
    /// previous content.
    ///
    /// The bytes land in a temp file first and are renamed into place, so a
    /// concurrent reader never observes a half-written document and the
    /// caller acknowledges the upload only after the rename has succeeded.
    pub async fn write(&self, name: &DocumentName, bytes: &[u8]) -> Result<()> {
        let path = self.document_path(name);
        let tmp = self.root.join(format!(".{}.tmp", name.file_name()));

        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| MarkdropError::io(&tmp, e))?;

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(MarkdropError::io(path, e));
        }

        debug!(name = %name, bytes = bytes.len(), "document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> DocumentName {
        DocumentName::new(s).unwrap()
    }

    #[tokio::test]
    async fn open_creates_missing_root() {
        let tempdir = tempfile::tempdir().unwrap();
        let root = tempdir.path().join("documents");
        assert!(!root.exists());

        let store = DocumentStore::open(&root).await.unwrap();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn write_then_read_round_trip() {
        let tempdir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tempdir.path()).await.unwrap();

        store.write(&name("note"), b"# Hello").await.unwrap();
        let content = store.read(&name("note")).await.unwrap();
        assert_eq!(content, "# Hello");

        // The durable file is in place and the temp file is gone.
        assert!(store.document_path(&name("note")).exists());
        assert!(!tempdir.path().join(".note.md.tmp").exists());
    }

    #[tokio::test]
    async fn overwrite_replaces_content() {
        let tempdir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tempdir.path()).await.unwrap();

        store.write(&name("note"), b"# Hello").await.unwrap();
        store.write(&name("note"), b"# Bye").await.unwrap();

        let content = store.read(&name("note")).await.unwrap();
        assert_eq!(content, "# Bye");

        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let tempdir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tempdir.path()).await.unwrap();

        let err = store.read(&name("missing")).await.unwrap_err();
        assert!(matches!(err, MarkdropError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn list_empty_store() {
        let tempdir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tempdir.path()).await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_sorted_and_skips_foreign_files() {
        let tempdir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tempdir.path()).await.unwrap();

        store.write(&name("zebra"), b"z").await.unwrap();
        store.write(&name("alpha"), b"a").await.unwrap();
        store.write(&name("mango"), b"m").await.unwrap();
        std::fs::write(tempdir.path().join("notes.txt"), "not a document").unwrap();
        std::fs::write(tempdir.path().join(".hidden.md"), "bad stem").unwrap();

        let entries = store.list().await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mango", "zebra"]);
        assert!(entries.iter().all(|e| e.modified.is_some()));
    }
}
