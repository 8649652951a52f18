// src/core/aggregate.rs
use crate::models::Metrics;
use std::sync::mpsc::{self, Receiver, Sender};

/// Running vault totals.
///
/// The totals only ever move by the per-document records passed to
/// [`Aggregate::increment`] and [`Aggregate::decrement`]. Every such call
/// sends the new totals to each subscriber.
#[derive(Debug, Default)]
pub struct Aggregate {
    totals: Metrics,
    subscribers: Vec<Sender<Metrics>>,
}

impl Aggregate {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn totals(&self) -> Metrics {
        self.totals
    }

    pub fn reset(&mut self) {
        self.totals = Metrics::ZERO;
    }

    /// Adds a record; `None` adds nothing but still notifies.
    pub fn increment(&mut self, metrics: Option<&Metrics>) {
        if let Some(metrics) = metrics {
            self.totals = self.totals.saturating_add(*metrics);
        }
        self.notify();
    }

    /// Removes a record; `None` removes nothing but still notifies.
    pub fn decrement(&mut self, metrics: Option<&Metrics>) {
        if let Some(metrics) = metrics {
            self.totals = self.totals.saturating_sub(*metrics);
        }
        self.notify();
    }

    #[must_use]
    pub fn subscribe(&mut self) -> Receiver<Metrics> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Registers an existing sender, e.g. one handed over a channel.
    pub fn subscribe_with(&mut self, subscriber: Sender<Metrics>) {
        self.subscribers.push(subscriber);
    }

    fn notify(&mut self) {
        let totals = self.totals;
        // Dropped receivers unsubscribe.
        self.subscribers
            .retain(|subscriber| subscriber.send(totals).is_ok());
    }
}
