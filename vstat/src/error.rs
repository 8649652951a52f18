// src/error.rs
use crate::models::DocumentId;
use std::io;
use thiserror::Error;

/// Ways computing the metrics of a single document can fail.
///
/// None of these are fatal: the collector recovers from every variant at the
/// granularity of one document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document has no structural metadata, usually because it was
    /// deleted or renamed after being queued.
    #[error("metadata unavailable for {id}")]
    MetadataUnavailable { id: DocumentId },

    #[error("failed to read content of {id}: {source}")]
    ContentRead {
        id: DocumentId,
        #[source]
        source: io::Error,
    },

    #[error("failed to extract metrics for {id}: {reason}")]
    Extraction { id: DocumentId, reason: String },
}

impl ExtractError {
    #[must_use]
    pub const fn id(&self) -> &DocumentId {
        match self {
            Self::MetadataUnavailable { id }
            | Self::ContentRead { id, .. }
            | Self::Extraction { id, .. } => id,
        }
    }
}

/// The collector thread is gone; nothing sent to it will be processed.
#[derive(Debug, Error)]
#[error("collector service has stopped")]
pub struct ServiceStopped;
