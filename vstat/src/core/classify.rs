// src/core/classify.rs
use crate::core::tokenizer::Tokenizer;
use crate::models::SectionKind;
use tracing::warn;

/// Picks the tokenizer for a section type.
///
/// Prose-bearing sections are word-tokenized; structural sections contribute
/// no words. Unknown section types contribute no words either and are
/// reported so they can be added to the table.
#[must_use]
pub fn classify(kind: &SectionKind) -> Tokenizer {
    match kind {
        SectionKind::Paragraph
        | SectionKind::Heading
        | SectionKind::List
        | SectionKind::Blockquote
        | SectionKind::Callout => Tokenizer::Word,
        SectionKind::Table
        | SectionKind::Yaml
        | SectionKind::Code
        | SectionKind::Math
        | SectionKind::ThematicBreak
        | SectionKind::Html
        | SectionKind::Text
        | SectionKind::Element
        | SectionKind::FootnoteDefinition
        | SectionKind::Definition => Tokenizer::Unit,
        SectionKind::Other(name) => {
            warn!(section_type = %name, "no tokenizer for section type");
            Tokenizer::Unit
        }
    }
}
