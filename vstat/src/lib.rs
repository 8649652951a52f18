// src/lib.rs
//! Vault statistics kept up to date incrementally.
//!
//! A [`Collector`] holds per-document [`Metrics`] and the vault totals.
//! Lifecycle events queue documents; draining the queue recomputes each one
//! and applies the difference to the totals.

pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use cli::{Args, run, scan};
pub use config::Settings;
pub use crate::core::collector::{Collector, VaultCollector};
pub use crate::core::service::{CollectorHandle, CollectorService};
pub use crate::core::tokenizer::{Tokenizer, tokenize};
pub use error::{ExtractError, ServiceStopped};
pub use models::{DocumentId, LifecycleEvent, Metrics};
