// src/utils.rs
use crate::models::DocumentId;
use std::path::{Component, Path};

/// Dot-files and dot-directories (`.git`, `.obsidian`, …) are never part of
/// the vault.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Builds a `/`-separated identity from a path relative to the vault root.
///
/// Returns `None` for an empty path or one that escapes the root.
pub fn to_document_id(relative: &Path) -> Option<DocumentId> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(DocumentId::new(parts.join("/")))
}
