// src/core/service.rs
use crate::core::collector::Collector;
use crate::core::metadata::MetadataProvider;
use crate::core::store::DocumentStore;
use crate::error::ServiceStopped;
use crate::models::{LifecycleEvent, Metrics};
use anyhow::{Context as _, Result, anyhow};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug)]
enum Command {
    Lifecycle(LifecycleEvent),
    Snapshot(Sender<Metrics>),
    Subscribe(Sender<Metrics>),
    Flush(Sender<usize>),
    Shutdown,
}

/// Sending side of a running [`CollectorService`].
///
/// Every method fails with [`ServiceStopped`] once the service thread has
/// exited.
#[derive(Debug, Clone)]
pub struct CollectorHandle {
    inbox: Sender<Command>,
}

impl CollectorHandle {
    /// Queues a lifecycle event; it is applied on the next drain.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceStopped`] if the service is no longer running.
    pub fn notify(&self, event: LifecycleEvent) -> Result<(), ServiceStopped> {
        self.send(Command::Lifecycle(event))
    }

    /// Current totals, including documents drained so far.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceStopped`] if the service is no longer running.
    pub fn totals(&self) -> Result<Metrics, ServiceStopped> {
        let (reply, answer) = mpsc::channel();
        self.send(Command::Snapshot(reply))?;
        answer.recv().map_err(|_| ServiceStopped)
    }

    /// Receives the totals after every change.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceStopped`] if the service is no longer running.
    pub fn subscribe(&self) -> Result<Receiver<Metrics>, ServiceStopped> {
        let (subscriber, updates) = mpsc::channel();
        self.send(Command::Subscribe(subscriber))?;
        Ok(updates)
    }

    /// Drains the backlog now instead of waiting for the next tick.
    ///
    /// Returns how many documents were recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceStopped`] if the service is no longer running.
    pub fn flush(&self) -> Result<usize, ServiceStopped> {
        let (reply, answer) = mpsc::channel();
        self.send(Command::Flush(reply))?;
        answer.recv().map_err(|_| ServiceStopped)
    }

    fn send(&self, command: Command) -> Result<(), ServiceStopped> {
        self.inbox.send(command).map_err(|_| ServiceStopped)
    }
}

/// Owns a [`Collector`] on a dedicated thread.
///
/// All access goes through messages, so lifecycle events and drains never
/// interleave. The backlog is drained every `interval` even while messages
/// keep arriving.
#[derive(Debug)]
pub struct CollectorService {
    handle: CollectorHandle,
    thread: Option<JoinHandle<()>>,
}

impl CollectorService {
    /// Moves `collector` onto a new thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn<S, M>(collector: Collector<S, M>, interval: Duration) -> Result<Self>
    where
        S: DocumentStore + Send + 'static,
        M: MetadataProvider + Send + 'static,
    {
        let (inbox, commands) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("vstat-collector".to_owned())
            .spawn(move || run(collector, &commands, interval))
            .context("Failed to spawn collector thread")?;

        info!(interval_ms = interval.as_millis(), "collector service started");
        Ok(Self {
            handle: CollectorHandle { inbox },
            thread: Some(thread),
        })
    }

    #[inline]
    #[must_use]
    pub fn handle(&self) -> CollectorHandle {
        self.handle.clone()
    }

    /// Stops the thread and waits for it to exit.
    ///
    /// Queued but undrained events are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the collector thread panicked.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // The thread may already be gone; joining tells us how it ended.
        let _ = self.handle.send(Command::Shutdown);
        thread
            .join()
            .map_err(|_| anyhow!("collector thread panicked"))
    }
}

impl Drop for CollectorService {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::error!(error = %err, "collector service did not stop cleanly");
        }
    }
}

fn run<S, M>(mut collector: Collector<S, M>, commands: &Receiver<Command>, interval: Duration)
where
    S: DocumentStore,
    M: MetadataProvider,
{
    let mut next_drain = Instant::now() + interval;

    loop {
        let timeout = next_drain.saturating_duration_since(Instant::now());
        match commands.recv_timeout(timeout) {
            Ok(Command::Lifecycle(event)) => collector.handle(event),
            Ok(Command::Snapshot(reply)) => {
                let _ = reply.send(collector.totals());
            }
            Ok(Command::Subscribe(subscriber)) => collector.subscribe_with(subscriber),
            Ok(Command::Flush(reply)) => {
                let _ = reply.send(collector.drain());
            }
            Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let now = Instant::now();
        if now >= next_drain {
            collector.drain();
            next_drain = now + interval;
        }
    }

    debug!(
        pending = collector.backlog_len(),
        "collector service stopped"
    );
}
