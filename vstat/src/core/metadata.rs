// src/core/metadata.rs
use crate::core::store::DocumentStore;
use crate::error::ExtractError;
use crate::models::{
    DocumentClassifier, DocumentId, DocumentKind, Section, SectionKind, StructuralMetadata,
};
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use std::io;
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

/// Source of parsed document structure.
pub trait MetadataProvider {
    /// Structure of one document.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MetadataUnavailable`] when the document cannot
    /// be found, typically because it was deleted or renamed.
    fn metadata(&self, id: &DocumentId) -> Result<StructuralMetadata, ExtractError>;
}

impl<T: MetadataProvider + ?Sized> MetadataProvider for Arc<T> {
    fn metadata(&self, id: &DocumentId) -> Result<StructuralMetadata, ExtractError> {
        (**self).metadata(id)
    }
}

/// Parses notes from a [`DocumentStore`] as markdown.
///
/// Attachments have no structure; they get empty metadata as long as they
/// still exist. So does a note that exists but cannot be read.
#[derive(Debug, Clone)]
pub struct MarkdownMetadata<S> {
    store: S,
    classifier: DocumentClassifier,
}

impl<S: DocumentStore> MarkdownMetadata<S> {
    #[inline]
    #[must_use]
    pub const fn new(store: S, classifier: DocumentClassifier) -> Self {
        Self { store, classifier }
    }
}

impl<S: DocumentStore> MetadataProvider for MarkdownMetadata<S> {
    fn metadata(&self, id: &DocumentId) -> Result<StructuralMetadata, ExtractError> {
        match self.classifier.classify(id) {
            DocumentKind::Note => match self.store.read(id) {
                Ok(content) => Ok(parse(&content)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!(document = %id, "note is gone");
                    Err(ExtractError::MetadataUnavailable { id: id.clone() })
                }
                Err(err) => {
                    debug!(document = %id, error = %err, "cannot parse note");
                    Ok(StructuralMetadata::default())
                }
            },
            DocumentKind::Attachment => match self.store.stat(id) {
                Ok(Some(_)) => Ok(StructuralMetadata::default()),
                Ok(None) => Err(ExtractError::MetadataUnavailable { id: id.clone() }),
                Err(err) => Err(ExtractError::Extraction {
                    id: id.clone(),
                    reason: err.to_string(),
                }),
            },
        }
    }
}

#[must_use]
pub fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_GFM);
    options.insert(Options::ENABLE_MATH);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_WIKILINKS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options
}

/// Top-level block currently open while walking the event stream.
struct OpenSection {
    kind: SectionKind,
    range: Range<usize>,
    has_math: bool,
    has_prose: bool,
}

impl OpenSection {
    fn finish(self) -> Section {
        // A paragraph holding nothing but `$$ … $$` is a math block.
        let kind = if self.kind == SectionKind::Paragraph && self.has_math && !self.has_prose {
            SectionKind::Math
        } else {
            self.kind
        };
        Section::new(kind, self.range)
    }
}

/// Splits a note into top-level sections and counts its outbound links.
#[must_use]
pub fn parse(content: &str) -> StructuralMetadata {
    let mut metadata = StructuralMetadata::default();
    let mut depth = 0_usize;
    let mut open: Option<OpenSection> = None;

    for (event, range) in Parser::new_ext(content, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if is_outbound_link(&tag) {
                    metadata.links = metadata.links.saturating_add(1);
                }
                if depth == 0 {
                    let leading = range.start == 0 && metadata.sections.is_empty();
                    if leading && matches!(tag, Tag::MetadataBlock(_)) {
                        metadata.frontmatter = Some(range.clone());
                    }
                    open = Some(OpenSection {
                        kind: section_kind(&tag, content, &range),
                        range,
                        has_math: false,
                        has_prose: false,
                    });
                } else if let Some(section) = open.as_mut() {
                    section.has_prose = true;
                }
                depth = depth.saturating_add(1);
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(section) = open.take() {
                        metadata.sections.push(section.finish());
                    }
                }
            }
            Event::Rule if depth == 0 => {
                metadata
                    .sections
                    .push(Section::new(SectionKind::ThematicBreak, range));
            }
            Event::DisplayMath(_) => {
                if let Some(section) = open.as_mut() {
                    section.has_math = true;
                }
            }
            Event::SoftBreak | Event::HardBreak => {}
            Event::Text(text) if text.trim().is_empty() => {}
            _ => {
                if let Some(section) = open.as_mut() {
                    section.has_prose = true;
                }
            }
        }
    }

    metadata
}

fn section_kind(tag: &Tag<'_>, content: &str, range: &Range<usize>) -> SectionKind {
    match tag {
        Tag::Paragraph => SectionKind::Paragraph,
        Tag::Heading { .. } => SectionKind::Heading,
        Tag::List(_) => SectionKind::List,
        Tag::Table(_) => SectionKind::Table,
        Tag::CodeBlock(_) => SectionKind::Code,
        Tag::HtmlBlock => SectionKind::Html,
        Tag::FootnoteDefinition(_) => SectionKind::FootnoteDefinition,
        Tag::MetadataBlock(_) => SectionKind::Yaml,
        Tag::DefinitionList => SectionKind::Definition,
        Tag::BlockQuote(Some(_)) => SectionKind::Callout,
        Tag::BlockQuote(None) => {
            let first_line = content
                .get(range.clone())
                .and_then(|block| block.lines().next())
                .unwrap_or_default();
            let marker = first_line.trim_start().trim_start_matches('>').trim_start();
            if marker.starts_with("[!") {
                SectionKind::Callout
            } else {
                SectionKind::Blockquote
            }
        }
        _ => SectionKind::Element,
    }
}

/// Wiki links and links to other documents; web and mail links are not
/// counted, nor are embeds.
fn is_outbound_link(tag: &Tag<'_>) -> bool {
    let Tag::Link {
        link_type,
        dest_url,
        ..
    } = tag
    else {
        return false;
    };
    match link_type {
        LinkType::WikiLink { .. } => true,
        LinkType::Autolink | LinkType::Email => false,
        _ => !dest_url.contains("://") && !dest_url.starts_with("mailto:"),
    }
}
