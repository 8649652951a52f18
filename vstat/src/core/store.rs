// src/core/store.rs
use crate::core::ignore::{Patterns, load_ignore_patterns};
use crate::models::{DocumentId, DocumentStat};
use crate::utils::{is_hidden, to_document_id};
use anyhow::{Context as _, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use walkdir::WalkDir;

/// Source of documents: enumeration, size and raw content.
pub trait DocumentStore {
    /// Lists every document currently in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated.
    fn documents(&self) -> Result<Vec<DocumentId>>;

    /// Size of a document, or `None` if it does not exist (any more).
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than the document being absent.
    fn stat(&self, id: &DocumentId) -> io::Result<Option<DocumentStat>>;

    /// Raw content of a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be read, including when the
    /// document was removed concurrently.
    fn read(&self, id: &DocumentId) -> io::Result<String>;

    /// Documents located below `id` when it names a folder.
    fn contained(&self, _id: &DocumentId) -> Vec<DocumentId> {
        Vec::new()
    }
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn documents(&self) -> Result<Vec<DocumentId>> {
        (**self).documents()
    }

    fn stat(&self, id: &DocumentId) -> io::Result<Option<DocumentStat>> {
        (**self).stat(id)
    }

    fn read(&self, id: &DocumentId) -> io::Result<String> {
        (**self).read(id)
    }

    fn contained(&self, id: &DocumentId) -> Vec<DocumentId> {
        (**self).contained(id)
    }
}

/// Decides which paths under a vault root are documents.
///
/// Hidden entries, excluded directory names and paths matched by the
/// vault's `.vstatignore` are left out.
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: PathBuf,
    exclude: Vec<String>,
    patterns: Patterns,
}

impl PathFilter {
    /// # Errors
    ///
    /// Returns an error if the ignore file exists but cannot be loaded.
    pub fn new(root: &Path, exclude: &[String]) -> Result<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            exclude: exclude.to_vec(),
            patterns: load_ignore_patterns(root)?,
        })
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps an absolute path to its document identity, or `None` if the path
    /// is outside the vault or filtered out.
    #[must_use]
    pub fn identify(&self, path: &Path) -> Option<DocumentId> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let filtered = relative.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            is_hidden(&name) || self.exclude.iter().any(|dir| *dir == name)
        });
        if filtered || self.patterns.matches(relative) {
            return None;
        }
        to_document_id(relative)
    }
}

/// A vault on the local filesystem.
#[derive(Debug, Clone)]
pub struct VaultStore {
    filter: PathFilter,
}

impl VaultStore {
    /// Opens the vault rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or its ignore file is
    /// invalid.
    pub fn open(root: &Path, exclude: &[String]) -> Result<Self> {
        let root = fs::canonicalize(root)
            .with_context(|| format!("Failed to open vault: {}", root.display()))?;
        Ok(Self {
            filter: PathFilter::new(&root, exclude)?,
        })
    }

    #[inline]
    #[must_use]
    pub const fn filter(&self) -> &PathFilter {
        &self.filter
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        self.filter.root()
    }

    #[must_use]
    pub fn path_of(&self, id: &DocumentId) -> PathBuf {
        id.as_str()
            .split('/')
            .fold(self.root().to_path_buf(), |path, part| path.join(part))
    }

    fn walk(&self, dir: &Path) -> Result<Vec<DocumentId>> {
        let mut ids = Vec::new();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || self.filter.identify(e.path()).is_some())
        {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(id) = self.filter.identify(entry.path()) {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }
}

impl DocumentStore for VaultStore {
    fn documents(&self) -> Result<Vec<DocumentId>> {
        self.walk(self.root())
    }

    fn stat(&self, id: &DocumentId) -> io::Result<Option<DocumentStat>> {
        match fs::metadata(self.path_of(id)) {
            Ok(metadata) if metadata.is_file() => Ok(Some(DocumentStat {
                size: metadata.len(),
            })),
            Ok(_) => Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn read(&self, id: &DocumentId) -> io::Result<String> {
        let bytes = fs::read(self.path_of(id))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn contained(&self, id: &DocumentId) -> Vec<DocumentId> {
        let path = self.path_of(id);
        if !path.is_dir() {
            return Vec::new();
        }
        self.walk(&path).unwrap_or_else(|err| {
            warn!(folder = %id, error = %err, "failed to enumerate folder");
            Vec::new()
        })
    }
}
