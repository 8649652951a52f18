// tests/integration_tests/ignore_patterns_test.rs
use super::common::{create_ignore_file, create_test_file, setup_test_vault, vault_collector};
use anyhow::Result;
use vstat::core::ignore::load_ignore_patterns;
use vstat::core::store::{DocumentStore, VaultStore};
use vstat::DocumentId;

#[test]
fn test_ignore_file_patterns() -> Result<()> {
    let temp_dir = setup_test_vault()?;

    create_ignore_file(
        temp_dir.path(),
        &[
            "# Comment line",
            "*.tmp",
            "drafts/",
            "!drafts/keep.md",
            "*.{log,cache}",
            "/root-only.md",
            "build/**/*.js",
        ],
    )?;

    let patterns = load_ignore_patterns(temp_dir.path())?;

    assert!(patterns.matches("scratch.tmp"), "Should match *.tmp pattern");
    assert!(patterns.matches("deep/scratch.tmp"), "Unanchored patterns match anywhere");
    assert!(patterns.matches("drafts/idea.md"), "Should match directory pattern");
    assert!(
        !patterns.matches("drafts/keep.md"),
        "Should respect negation pattern"
    );
    assert!(patterns.matches("app.log"), "Should expand extension groups");
    assert!(patterns.matches("data.cache"), "Should expand extension groups");
    assert!(patterns.matches("root-only.md"), "Should match anchored pattern");
    assert!(
        !patterns.matches("nested/root-only.md"),
        "Anchored pattern should not match below the root"
    );
    assert!(patterns.matches("build/src/main.js"), "Should match globstar pattern");
    assert!(!patterns.matches("index.md"), "Should not match other files");

    Ok(())
}

#[test]
fn test_ignored_documents_are_not_counted() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    create_ignore_file(temp_dir.path(), &["assets/", "projects/beta.md"])?;

    let mut collector = vault_collector(temp_dir.path())?;
    assert_eq!(collector.start()?, 2);
    collector.drain();

    let totals = collector.totals();
    assert_eq!(totals.attachments, 0);
    assert_eq!(totals.notes, 2);
    assert_eq!(totals.words, 6 + 15);
    Ok(())
}

#[test]
fn test_exclude_and_hidden_entries() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    create_test_file(temp_dir.path(), "templates/daily.md", "Template text")?;
    create_test_file(temp_dir.path(), ".trash/old.md", "Deleted text")?;

    let store = VaultStore::open(temp_dir.path(), &["templates".to_owned()])?;
    let documents = store.documents()?;

    assert!(!documents.contains(&DocumentId::from("templates/daily.md")));
    assert!(!documents.contains(&DocumentId::from(".trash/old.md")));
    assert!(!documents.contains(&DocumentId::from(".obsidian/workspace.json")));
    assert!(
        !documents.contains(&DocumentId::from(".git/HEAD")),
        "hidden directories are skipped even when not excluded"
    );
    assert_eq!(documents.len(), 5);
    Ok(())
}

#[test]
fn test_invalid_ignore_file_is_reported() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    create_ignore_file(temp_dir.path(), &["*.{png"])?;

    let err = VaultStore::open(temp_dir.path(), &[])
        .err()
        .ok_or_else(|| anyhow::anyhow!("expected an invalid pattern error"))?;
    assert!(
        format!("{err:#}").contains("Unbalanced"),
        "unexpected error: {err:#}"
    );
    Ok(())
}
