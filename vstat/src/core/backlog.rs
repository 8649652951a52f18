// src/core/backlog.rs
use crate::models::DocumentId;
use std::collections::{HashSet, VecDeque};

/// FIFO of documents awaiting recomputation. A document already waiting is
/// not queued twice.
#[derive(Debug, Default)]
pub struct Backlog {
    queue: VecDeque<DocumentId>,
    queued: HashSet<DocumentId>,
}

impl Backlog {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `id` unless it is already waiting. Returns whether it was added.
    pub fn push(&mut self, id: DocumentId) -> bool {
        if self.queued.contains(&id) {
            return false;
        }
        self.queued.insert(id.clone());
        self.queue.push_back(id);
        true
    }

    pub fn pop(&mut self) -> Option<DocumentId> {
        let id = self.queue.pop_front()?;
        self.queued.remove(&id);
        Some(id)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.queued.contains(id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.queued.clear();
    }
}
