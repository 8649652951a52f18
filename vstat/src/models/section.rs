// src/models/section.rs
use std::fmt;
use std::ops::Range;

/// Structural type of a block inside a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Paragraph,
    Heading,
    List,
    Table,
    Yaml,
    Code,
    Blockquote,
    Math,
    ThematicBreak,
    Html,
    Text,
    Element,
    FootnoteDefinition,
    Definition,
    Callout,
    /// A section type reported by a provider that this crate does not know.
    Other(String),
}

impl SectionKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "paragraph" => Self::Paragraph,
            "heading" => Self::Heading,
            "list" => Self::List,
            "table" => Self::Table,
            "yaml" => Self::Yaml,
            "code" => Self::Code,
            "blockquote" => Self::Blockquote,
            "math" => Self::Math,
            "thematicBreak" => Self::ThematicBreak,
            "html" => Self::Html,
            "text" => Self::Text,
            "element" => Self::Element,
            "footnoteDefinition" => Self::FootnoteDefinition,
            "definition" => Self::Definition,
            "callout" => Self::Callout,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::List => "list",
            Self::Table => "table",
            Self::Yaml => "yaml",
            Self::Code => "code",
            Self::Blockquote => "blockquote",
            Self::Math => "math",
            Self::ThematicBreak => "thematicBreak",
            Self::Html => "html",
            Self::Text => "text",
            Self::Element => "element",
            Self::FootnoteDefinition => "footnoteDefinition",
            Self::Definition => "definition",
            Self::Callout => "callout",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed byte range `[start, end)` into the raw content of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub range: Range<usize>,
}

impl Section {
    #[inline]
    #[must_use]
    pub const fn new(kind: SectionKind, range: Range<usize>) -> Self {
        Self { kind, range }
    }
}

/// Parsed structure of a document as delivered by a metadata provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralMetadata {
    pub sections: Vec<Section>,
    /// Outbound links recorded for the document.
    pub links: u64,
    /// Byte range of a leading front-matter block, excluded from word counts.
    pub frontmatter: Option<Range<usize>>,
}
