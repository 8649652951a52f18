// src/models/document.rs
use std::fmt;

/// Stable key of a document: its `/`-separated path relative to the vault root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension of the final path component, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.0.rsplit('/').next().unwrap_or(&self.0);
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext)
    }

    /// Whether `other` lives below this identity when it names a folder.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other
            .0
            .strip_prefix(&self.0)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for DocumentId {
    fn from(path: String) -> Self {
        Self(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Note,
    Attachment,
}

/// Size information reported by a document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStat {
    pub size: u64,
}

/// Decides whether a document is a note or an attachment from its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentClassifier {
    note_extensions: Vec<String>,
}

impl DocumentClassifier {
    #[must_use]
    pub fn new<I, S>(note_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            note_extensions: note_extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn classify(&self, id: &DocumentId) -> DocumentKind {
        let is_note = id.extension().is_some_and(|ext| {
            self.note_extensions
                .iter()
                .any(|note_ext| note_ext.eq_ignore_ascii_case(ext))
        });
        if is_note {
            DocumentKind::Note
        } else {
            DocumentKind::Attachment
        }
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new(["md"])
    }
}

/// A change reported by the document store or the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Created(DocumentId),
    Modified(DocumentId),
    Deleted(DocumentId),
    Renamed { from: DocumentId, to: DocumentId },
    MetadataChanged(DocumentId),
}
