// src/core/ignore/patterns.rs
use anyhow::{Context as _, Result, bail};
use glob::Pattern;
use std::path::Path;

#[derive(Debug, Clone)]
struct Rule {
    glob: Pattern,
    negated: bool,
}

/// Gitignore-style patterns matched against vault-relative paths.
///
/// Rules are evaluated in order and the last matching rule wins, so a later
/// `!pattern` re-includes what an earlier pattern excluded.
#[derive(Debug, Clone, Default)]
pub struct Patterns {
    rules: Vec<Rule>,
}

impl Patterns {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Adds one line of an ignore file.
    ///
    /// Supported forms:
    /// - `!pattern` negates a previous match
    /// - `/pattern` is anchored to the vault root
    /// - `dir/` matches everything below a directory
    /// - `*.{png,jpg}` expands into one rule per alternative
    ///
    /// Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the line has unbalanced braces or is not a valid
    /// glob.
    pub fn add_pattern(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (line, negated) = line
            .strip_prefix('!')
            .map_or((line, false), |rest| (rest, true));
        let (line, anchored) = line
            .strip_prefix('/')
            .map_or((line, false), |rest| (rest, true));
        let (body, dir_only) = line
            .strip_suffix('/')
            .map_or((line, false), |rest| (rest, true));

        for body in expand_braces(body)? {
            // A slash inside the pattern anchors it, as in gitignore.
            let base = if anchored || body.contains('/') {
                body
            } else {
                format!("**/{body}")
            };

            let mut globs = vec![format!("{base}/**")];
            if !dir_only {
                globs.push(base);
            }

            for glob in globs {
                let compiled =
                    Pattern::new(&glob).with_context(|| format!("Invalid ignore pattern: {glob}"))?;
                self.rules.push(Rule {
                    glob: compiled,
                    negated,
                });
            }
        }

        Ok(())
    }

    /// Whether a vault-relative path is ignored.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref().to_string_lossy().replace('\\', "/");
        let path = path.trim_start_matches("./").trim_end_matches('/');

        self.rules
            .iter()
            .rev()
            .find(|rule| rule.glob.matches(path))
            .is_some_and(|rule| !rule.negated)
    }
}

fn expand_braces(body: &str) -> Result<Vec<String>> {
    let Some((prefix, rest)) = body.split_once('{') else {
        if body.contains('}') {
            bail!("Unbalanced '}}' in ignore pattern: {body}");
        }
        return Ok(vec![body.to_owned()]);
    };
    let Some((alternatives, suffix)) = rest.split_once('}') else {
        bail!("Unbalanced '{{' in ignore pattern: {body}");
    };

    Ok(alternatives
        .split(',')
        .map(str::trim)
        .map(|alternative| format!("{prefix}{alternative}{suffix}"))
        .collect())
}
