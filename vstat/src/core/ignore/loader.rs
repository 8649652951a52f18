// src/core/ignore/loader.rs
use crate::core::ignore::Patterns;
use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

pub const IGNORE_FILE: &str = ".vstatignore";

/// Loads ignore patterns from the nearest `.vstatignore`, looking in `dir`
/// first and then in each of its parents.
///
/// # Errors
///
/// Returns an error if an ignore file exists but cannot be read, or if one
/// of its lines is not a valid pattern.
pub fn load_ignore_patterns(dir: &Path) -> Result<Patterns> {
    let mut patterns = Patterns::new();

    let Some(ignore_file) = dir
        .ancestors()
        .map(|ancestor| ancestor.join(IGNORE_FILE))
        .find(|candidate| candidate.is_file())
    else {
        return Ok(patterns);
    };

    let content = fs::read_to_string(&ignore_file)
        .with_context(|| format!("Failed to read ignore file: {}", ignore_file.display()))?;
    for line in content.lines() {
        patterns
            .add_pattern(line)
            .with_context(|| format!("In ignore file: {}", ignore_file.display()))?;
    }

    Ok(patterns)
}
