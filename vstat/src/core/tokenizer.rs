// src/core/tokenizer.rs
use regex::Regex;
use std::sync::LazyLock;

/// Runs of separators between raw tokens.
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[ \n\r\t"|,()\[\]/]+"#).expect("valid boundary regex"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid number regex"));

static CODE_BLOCK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```\w*$").expect("valid code block header regex"));

/// Either one CJK character, or a run of Latin, Greek, Cyrillic or Arabic
/// letters, digits and underscores. `×` and `÷` are not letters.
static SCRIPT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[\x{4E00}-\x{9FFF}\x{3040}-\x{30FF}\x{AC00}-\x{D7AF}]",
        r"|[0-9A-Za-z_\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{024F}\x{1E00}-\x{1EFF}",
        r"\x{0370}-\x{03FF}\x{0400}-\x{04FF}\x{0600}-\x{06FF}]+",
    ))
    .expect("valid script run regex")
});

const PUNCTUATION: [char; 7] = ['`', '.', ':', '"', ',', '!', '?'];

type StripRule = fn(&str) -> &str;

/// Applied in order, repeatedly, until a full pass changes nothing.
const STRIP_RULES: [StripRule; 4] = [
    strip_highlights,
    strip_formatting,
    strip_punctuation,
    strip_wiki_links,
];

/// Splits section content into word tokens.
///
/// `Unit` is used for sections that carry no prose (code, tables, html,
/// math, front-matter); it never yields a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    Unit,
    Word,
}

impl Tokenizer {
    #[must_use]
    pub fn tokenize(self, content: &str) -> Vec<String> {
        match self {
            Self::Unit => Vec::new(),
            Self::Word => tokenize(content),
        }
    }
}

/// Tokenizes markdown prose into words, in source order.
///
/// Numbers and code fence headers are not words. Emphasis, highlight,
/// wiki-link markers and surrounding punctuation are stripped, and every
/// CJK character counts as a word of its own.
///
/// # Examples
///
/// ```
/// use vstat::core::tokenizer::tokenize;
///
/// assert_eq!(tokenize("**Hello**, [[world]]!"), vec!["Hello", "world"]);
/// assert_eq!(tokenize("中文/Chinese"), vec!["中", "文", "Chinese"]);
/// ```
#[must_use]
pub fn tokenize(content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    WORD_BOUNDARY
        .split(content)
        .filter(|token| !NUMBER.is_match(token))
        .filter(|token| !CODE_BLOCK_HEADER.is_match(token))
        .map(strip_markers)
        .flat_map(|token| SCRIPT_RUN.find_iter(token).map(|run| strip_markers(run.as_str())))
        .filter(|word| !word.is_empty() && !NUMBER.is_match(word))
        .map(str::to_owned)
        .collect()
}

/// Strips stacked markers such as `_**foo**_` down to `foo`.
fn strip_markers(token: &str) -> &str {
    let mut current = token;
    loop {
        let next = STRIP_RULES.iter().fold(current, |token, rule| rule(token));
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn strip_highlights(token: &str) -> &str {
    let token = token.strip_prefix("==").unwrap_or(token);
    token.strip_suffix("==").unwrap_or(token)
}

/// Removes one leading and one trailing run of `_` or of `*`.
fn strip_formatting(token: &str) -> &str {
    let token = match token.chars().next() {
        Some(marker @ ('_' | '*')) => token.trim_start_matches(marker),
        _ => token,
    };
    match token.chars().next_back() {
        Some(marker @ ('_' | '*')) => token.trim_end_matches(marker),
        _ => token,
    }
}

fn strip_punctuation(token: &str) -> &str {
    let token = token.strip_prefix(PUNCTUATION).unwrap_or(token);
    token.strip_suffix(PUNCTUATION).unwrap_or(token)
}

fn strip_wiki_links(token: &str) -> &str {
    let token = token.strip_prefix("[[").unwrap_or(token);
    token.strip_suffix("]]").unwrap_or(token)
}
