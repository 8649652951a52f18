// tests/integration_tests/scanning_test.rs
use super::common::{create_test_file, setup_test_vault, vault_collector};
use anyhow::Result;
use std::fs;
use vstat::{DocumentId, Metrics};

fn file_size(root: &std::path::Path, name: &str) -> Result<u64> {
    Ok(fs::metadata(root.join(name))?.len())
}

#[test]
fn test_full_scan() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let root = temp_dir.path();
    let mut collector = vault_collector(root)?;

    let queued = collector.start()?;
    assert_eq!(queued, 5, "hidden folders are not part of the vault");
    assert_eq!(collector.drain(), 5);

    let totals = collector.totals();
    assert_eq!(totals.files, 5);
    assert_eq!(totals.notes, 3);
    assert_eq!(totals.attachments, 2);
    assert_eq!(totals.links, 3);
    assert_eq!(totals.words, 6 + 15 + 4);

    let mut size = 0;
    for name in [
        "index.md",
        "projects/alpha.md",
        "projects/beta.md",
        "assets/logo.png",
        "assets/report.pdf",
    ] {
        size += file_size(root, name)?;
    }
    assert_eq!(totals.size, size);
    Ok(())
}

#[test]
fn test_per_document_records() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let root = temp_dir.path();
    let mut collector = vault_collector(root)?;
    collector.start()?;
    collector.drain();

    assert_eq!(
        collector.cached(&DocumentId::from("index.md")),
        Some(&Metrics::note(file_size(root, "index.md")?, 0, 6)),
        "front-matter words are not counted"
    );
    assert_eq!(
        collector.cached(&DocumentId::from("projects/beta.md")),
        Some(&Metrics::note(file_size(root, "projects/beta.md")?, 0, 4)),
        "code blocks and tables are not prose"
    );
    assert_eq!(
        collector.cached(&DocumentId::from("assets/logo.png")),
        Some(&Metrics::attachment(file_size(root, "assets/logo.png")?))
    );
    assert_eq!(collector.cached(&DocumentId::from(".git/HEAD")), None);
    assert_eq!(collector.totals(), collector.cached_total());
    Ok(())
}

#[test]
fn test_note_extensions_are_case_insensitive() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    create_test_file(temp_dir.path(), "SHOUTING.MD", "Loud words")?;
    let mut collector = vault_collector(temp_dir.path())?;
    collector.start()?;
    collector.drain();

    let totals = collector.totals();
    assert_eq!(totals.notes, 4);
    assert_eq!(totals.words, 25 + 2);
    Ok(())
}

#[test]
fn test_empty_vault() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let mut collector = vault_collector(temp_dir.path())?;

    assert_eq!(collector.start()?, 0);
    assert_eq!(collector.drain(), 0);
    assert_eq!(collector.totals(), Metrics::ZERO);
    Ok(())
}

#[test]
fn test_invalid_utf8_still_counts() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    fs::write(temp_dir.path().join("broken.md"), b"valid words \xff\xfe here")?;
    let mut collector = vault_collector(temp_dir.path())?;
    collector.start()?;
    collector.drain();

    let totals = collector.totals();
    assert_eq!(totals.notes, 1);
    assert_eq!(totals.words, 3, "invalid bytes are replaced, not fatal");
    Ok(())
}
