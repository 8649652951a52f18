// src/models.rs
pub mod document;
pub mod metrics;
pub mod section;

pub use document::{DocumentClassifier, DocumentId, DocumentKind, DocumentStat, LifecycleEvent};
pub use metrics::Metrics;
pub use section::{Section, SectionKind, StructuralMetadata};
