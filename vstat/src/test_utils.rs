// src/test_utils.rs
use anyhow::Result;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.path().join(name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(&file_path)?;
    file.write_all(content.as_bytes())?;
    Ok(file_path)
}

/// A small vault with two notes at the root, one in a folder and one
/// attachment.
pub fn setup_test_vault() -> Result<TempDir> {
    let dir = TempDir::new()?;

    create_test_file(
        &dir,
        "welcome.md",
        "---\ntags: [intro]\n---\n# Welcome\n\nThis is your new vault.\n",
    )?;
    create_test_file(
        &dir,
        "links.md",
        "See [[welcome]] and [the daily note](daily/today.md).\n\nAlso <https://example.com>.\n",
    )?;
    create_test_file(&dir, "daily/today.md", "- buy milk\n- call mom\n")?;
    create_test_file(&dir, "attachments/diagram.png", "\u{89}PNG not really")?;

    Ok(dir)
}
