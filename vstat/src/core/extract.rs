// src/core/extract.rs
use crate::core::classify::classify;
use crate::core::metadata::MetadataProvider;
use crate::core::store::DocumentStore;
use crate::error::ExtractError;
use crate::models::{DocumentClassifier, DocumentId, DocumentKind, Metrics, StructuralMetadata};
use tracing::{debug, debug_span, warn};

/// Computes the metrics of one document from the store and its metadata.
#[derive(Debug, Clone)]
pub struct Extractor<S, M> {
    store: S,
    metadata: M,
    classifier: DocumentClassifier,
}

impl<S: DocumentStore, M: MetadataProvider> Extractor<S, M> {
    #[inline]
    #[must_use]
    pub const fn new(store: S, metadata: M, classifier: DocumentClassifier) -> Self {
        Self {
            store,
            metadata,
            classifier,
        }
    }

    #[inline]
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Metrics of the document as it is now.
    ///
    /// Returns `Ok(None)` when the document has no metadata or no longer
    /// exists; the caller drops it from the totals. A note whose content
    /// cannot be read still counts, with zero words.
    ///
    /// # Errors
    ///
    /// Returns an error for any other failure; the caller treats it the same
    /// way as an absent document.
    pub fn extract(&self, id: &DocumentId) -> Result<Option<Metrics>, ExtractError> {
        let _span = debug_span!("extract", document = %id).entered();

        let metadata = match self.metadata.metadata(id) {
            Ok(metadata) => metadata,
            Err(ExtractError::MetadataUnavailable { .. }) => {
                debug!("metadata unavailable");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let stat = self
            .store
            .stat(id)
            .map_err(|err| ExtractError::Extraction {
                id: id.clone(),
                reason: err.to_string(),
            })?;
        let Some(stat) = stat else {
            debug!("document vanished");
            return Ok(None);
        };

        let metrics = match self.classifier.classify(id) {
            DocumentKind::Attachment => Metrics::attachment(stat.size),
            DocumentKind::Note => {
                let words = match self.store.read(id) {
                    Ok(content) => count_words(&content, &metadata),
                    Err(source) => {
                        let err = ExtractError::ContentRead {
                            id: id.clone(),
                            source,
                        };
                        warn!(error = %err, "counting zero words");
                        0
                    }
                };
                Metrics::note(stat.size, metadata.links, words)
            }
        };

        Ok(Some(metrics))
    }
}

/// Sums the words of every section, leaving out the front-matter block.
#[must_use]
pub fn count_words(content: &str, metadata: &StructuralMetadata) -> u64 {
    let header = metadata.frontmatter.clone().unwrap_or(0..0);

    metadata
        .sections
        .iter()
        .map(|section| {
            let overlaps_header =
                section.range.start < header.end && header.start < section.range.end;
            let start = if overlaps_header {
                section.range.start.max(header.end)
            } else {
                section.range.start
            };
            let end = section.range.end.min(content.len());
            if start >= end {
                return 0;
            }
            let Some(text) = content.get(start..end) else {
                debug!(section = %section.kind, start, end, "section is not on a character boundary");
                return 0;
            };
            let tokens = classify(&section.kind).tokenize(text);
            u64::try_from(tokens.len()).unwrap_or(u64::MAX)
        })
        .fold(0_u64, u64::saturating_add)
}
