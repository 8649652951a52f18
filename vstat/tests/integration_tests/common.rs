// tests/integration_tests/common.rs
use anyhow::Result;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tempfile::TempDir;
use vstat::core::store::VaultStore;
use vstat::models::DocumentClassifier;
use vstat::VaultCollector;

pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn create_ignore_file(dir: &Path, patterns: &[&str]) -> Result<()> {
    let content = patterns.join("\n");
    create_test_file(dir, ".vstatignore", &content)
}

/// A vault with front-matter, links, a callout, a code block, a table,
/// attachments and the usual hidden folders.
pub fn setup_test_vault() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    // 6 words: the front-matter is not counted.
    create_test_file(
        root,
        "index.md",
        "---\ntitle: Index\ntags: [home]\n---\n# Home Page\n\nStart here, then explore.\n",
    )?;

    // 15 words, 3 internal links; the bare URL is plain text.
    create_test_file(
        root,
        "projects/alpha.md",
        "Alpha builds on [[index]] and [[beta]].\n\n\
         See [notes](notes.md) or https://example.com today.\n",
    )?;

    // 4 words: code block and table contribute nothing.
    create_test_file(
        root,
        "projects/beta.md",
        "> [!note] Heads up\n> Beta\n\n```rust\nfn main() {}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n",
    )?;

    create_test_file(root, "assets/logo.png", "not really a png")?;
    create_test_file(root, "assets/report.pdf", "%PDF-1.4")?;

    create_test_file(root, ".obsidian/workspace.json", "{}")?;
    create_test_file(root, ".git/HEAD", "ref: refs/heads/main")?;

    Ok(temp_dir)
}

pub fn vault_collector(root: &Path) -> Result<VaultCollector> {
    let store = VaultStore::open(root, &[".git".to_owned()])?;
    Ok(VaultCollector::for_vault(store, DocumentClassifier::default()))
}
