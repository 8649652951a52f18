// src/core/collector.rs
use crate::core::aggregate::Aggregate;
use crate::core::backlog::Backlog;
use crate::core::extract::Extractor;
use crate::core::metadata::{MarkdownMetadata, MetadataProvider};
use crate::core::store::{DocumentStore, VaultStore};
use crate::models::{DocumentClassifier, DocumentId, LifecycleEvent, Metrics};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info, warn};

/// Keeps the vault totals consistent with per-document metrics.
///
/// Lifecycle events only queue documents. [`Collector::drain`] recomputes
/// queued documents one at a time and folds the difference between old and
/// new metrics into the aggregate. Once the backlog is empty the aggregate
/// equals the sum of the cached per-document metrics.
#[derive(Debug)]
pub struct Collector<S, M> {
    extractor: Extractor<S, M>,
    cache: HashMap<DocumentId, Metrics>,
    backlog: Backlog,
    aggregate: Aggregate,
}

impl<S: DocumentStore, M: MetadataProvider> Collector<S, M> {
    #[must_use]
    pub fn new(extractor: Extractor<S, M>) -> Self {
        Self {
            extractor,
            cache: HashMap::new(),
            backlog: Backlog::new(),
            aggregate: Aggregate::new(),
        }
    }

    /// Forgets everything and queues every document in the store.
    ///
    /// Returns the number of queued documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated; the collector is
    /// left empty in that case.
    pub fn start(&mut self) -> Result<usize> {
        self.cache.clear();
        self.backlog.clear();
        self.aggregate.reset();

        let documents = self.extractor.store().documents()?;
        let count = documents.len();
        for id in documents {
            self.backlog.push(id);
        }

        info!(documents = count, "collector started");
        Ok(count)
    }

    /// Queues a document for recomputation.
    pub fn mark_dirty(&mut self, id: DocumentId) {
        self.backlog.push(id);
    }

    /// Queues `id` and, when it names a folder that just appeared, the
    /// documents the store finds below it.
    fn mark_added(&mut self, id: DocumentId) {
        let children = self.extractor.store().contained(&id);
        self.mark_dirty(id);
        for child in children {
            self.mark_dirty(child);
        }
    }

    /// Queues `id` and, when it names a folder that went away, the cached
    /// documents below it.
    fn mark_removed(&mut self, id: DocumentId) {
        let children: Vec<DocumentId> = self
            .cache
            .keys()
            .filter(|cached| id.contains(cached))
            .cloned()
            .collect();
        self.mark_dirty(id);
        for child in children {
            self.mark_dirty(child);
        }
    }

    pub fn handle(&mut self, event: LifecycleEvent) {
        debug!(?event, "lifecycle event");
        match event {
            LifecycleEvent::Modified(id) | LifecycleEvent::MetadataChanged(id) => {
                self.mark_dirty(id);
            }
            LifecycleEvent::Created(id) => self.mark_added(id),
            LifecycleEvent::Deleted(id) => self.mark_removed(id),
            LifecycleEvent::Renamed { from, to } => {
                self.mark_added(to);
                self.mark_removed(from);
            }
        }
    }

    /// Recomputes queued documents until the backlog is empty.
    ///
    /// A document that fails to extract is dropped from the totals; the
    /// rest of the backlog is still processed. Returns how many documents
    /// were recomputed.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0_usize;
        while let Some(id) = self.backlog.pop() {
            let metrics = match self.extractor.extract(&id) {
                Ok(metrics) => metrics,
                Err(err) => {
                    warn!(document = %err.id(), error = %err, "dropping document from totals");
                    None
                }
            };
            self.update(id, metrics);
            processed = processed.saturating_add(1);
        }
        if processed > 0 {
            debug!(processed, totals = ?self.aggregate.totals(), "backlog drained");
        }
        processed
    }

    /// Replaces the cached metrics of `id` and applies the difference.
    pub fn update(&mut self, id: DocumentId, metrics: Option<Metrics>) {
        self.aggregate.decrement(self.cache.get(&id));
        match metrics {
            Some(metrics) => {
                self.cache.insert(id, metrics);
            }
            None => {
                self.cache.remove(&id);
            }
        }
        self.aggregate.increment(metrics.as_ref());
    }

    #[inline]
    #[must_use]
    pub const fn totals(&self) -> Metrics {
        self.aggregate.totals()
    }

    /// Receives the totals after every change.
    #[must_use]
    pub fn subscribe(&mut self) -> Receiver<Metrics> {
        self.aggregate.subscribe()
    }

    pub fn subscribe_with(&mut self, subscriber: Sender<Metrics>) {
        self.aggregate.subscribe_with(subscriber);
    }

    #[inline]
    #[must_use]
    pub fn cached(&self, id: &DocumentId) -> Option<&Metrics> {
        self.cache.get(id)
    }

    /// Sum of all cached metrics, computed from scratch.
    #[must_use]
    pub fn cached_total(&self) -> Metrics {
        self.cache.values().sum()
    }

    #[inline]
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    #[must_use]
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }
}

/// Collector over a vault on disk, parsing notes as markdown.
pub type VaultCollector = Collector<Arc<VaultStore>, MarkdownMetadata<Arc<VaultStore>>>;

impl VaultCollector {
    #[must_use]
    pub fn for_vault(store: VaultStore, classifier: DocumentClassifier) -> Self {
        let store = Arc::new(store);
        let metadata = MarkdownMetadata::new(Arc::clone(&store), classifier.clone());
        Self::new(Extractor::new(store, metadata, classifier))
    }
}
