// src/cli.rs
use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use tracing::debug;

use crate::config::Settings;
use crate::core::collector::VaultCollector;
use crate::core::service::CollectorService;
use crate::core::store::{PathFilter, VaultStore};
use crate::core::watch::VaultWatcher;
use crate::display::{Statistic, StatusLine};
use crate::models::{DocumentClassifier, Metrics};

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Vault directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Settings file (defaults to <DIRECTORY>/.vstat.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directories to exclude (comma-separated), replaces the configured list
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// Milliseconds between backlog drains in watch mode
    #[arg(long)]
    pub interval: Option<u64>,

    /// Show every selected statistic side by side
    #[arg(long)]
    pub individual: bool,

    /// Statistics for the status line (comma-separated); the first one is
    /// focused unless --individual is set
    #[arg(long, value_enum, value_delimiter = ',')]
    pub item: Vec<Statistic>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "trace", "vstat=debug")
    #[arg(long)]
    pub log_level: Option<String>,

    /// Keep running and print the status line whenever the totals change
    #[arg(short, long)]
    pub watch: bool,
}

impl Args {
    /// Settings from the vault's file with command-line overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded or the interval
    /// is zero.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(&self.directory, self.config.as_deref())?;

        if let Some(exclude) = &self.exclude {
            settings.exclude = exclude
                .split(',')
                .map(str::trim)
                .filter(|dir| !dir.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(interval) = self.interval {
            settings.drain_interval_ms = interval;
        }
        if self.individual {
            settings.display_individual_items = true;
        }
        if settings.display_individual_items {
            for item in &self.item {
                item.enable_in(&mut settings);
            }
        }
        if settings.drain_interval_ms == 0 {
            bail!("Drain interval must be at least 1 ms");
        }

        Ok(settings)
    }

    fn status_line(&self, settings: &Settings) -> StatusLine {
        let line = StatusLine::new(settings);
        match self.item.first() {
            Some(focus) => line.with_focus(*focus),
            None => line,
        }
    }
}

/// Opens the vault and queues every document without draining.
///
/// # Errors
///
/// Returns an error if the vault cannot be opened or enumerated.
pub fn open_vault(args: &Args, settings: &Settings) -> Result<(VaultCollector, PathFilter)> {
    let store = VaultStore::open(&args.directory, &settings.exclude)?;
    let filter = store.filter().clone();
    let mut collector =
        VaultCollector::for_vault(store, DocumentClassifier::new(&settings.note_extensions));
    collector.start()?;
    Ok((collector, filter))
}

/// Totals of the vault as it is now.
///
/// # Errors
///
/// Returns an error if the vault cannot be opened or enumerated.
pub fn scan(args: &Args) -> Result<Metrics> {
    let settings = args.settings()?;
    let (mut collector, _) = open_vault(args, &settings)?;
    collector.drain();
    Ok(collector.totals())
}

pub fn run(args: Args) -> Result<()> {
    if args.watch {
        return watch(&args);
    }

    let totals = scan(&args)?;
    println!("{}", StatusLine::tooltip(&totals));
    Ok(())
}

fn watch(args: &Args) -> Result<()> {
    let settings = args.settings()?;
    let line = args.status_line(&settings);
    let interval = settings.drain_interval();
    let (collector, filter) = open_vault(args, &settings)?;

    let service = CollectorService::spawn(collector, interval)?;
    let handle = service.handle();
    let updates = handle.subscribe()?;
    let _watcher = VaultWatcher::start(filter, handle.clone())?;
    debug!(focus = line.focus().name(), "watching for changes");

    handle.flush()?;
    let mut latest = handle.totals()?;
    let mut shown = String::new();
    loop {
        let rendered = line.render(&latest);
        if rendered != shown {
            println!("{rendered}");
            shown = rendered;
        }

        // Wait for a change, then let the updates settle for one interval.
        let Ok(next) = updates.recv() else {
            break;
        };
        latest = next;
        loop {
            match updates.recv_timeout(interval) {
                Ok(next) => latest = next,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return service.shutdown(),
            }
        }
    }

    service.shutdown()
}
