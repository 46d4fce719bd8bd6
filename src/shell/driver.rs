use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::watcher::FileWatcher;
use crate::tail::{DisplayRecord, TailError, TailReader};
use crate::ui::Spinner;

/// How the driver schedules polls.
#[derive(Debug, Clone, Copy)]
pub struct DriverOptions {
    /// Fallback poll interval. Always active.
    pub interval: Duration,
    /// Also poll on filesystem change notifications.
    pub watch: bool,
}

/// Why a poll happened; only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Tick,
    Changed,
}

/// Owns a [`TailReader`] and polls it from a single task.
///
/// Timer ticks and change notifications are arms of the same `select!`,
/// so the reader never needs a lock.
pub struct Driver {
    reader: TailReader,
    options: DriverOptions,
}

impl Driver {
    pub const fn new(reader: TailReader, options: DriverOptions) -> Self {
        Self { reader, options }
    }

    /// Polls until `shutdown` resolves, handing every record to `sink`.
    ///
    /// Returns the reader so callers can inspect the final cursor. A sink
    /// error (e.g. a closed stdout) or invalid UTF-8 in the log stops the
    /// loop and is returned. Missing or unreadable files are retried.
    pub async fn run<F, S>(mut self, shutdown: F, mut sink: S) -> Result<TailReader>
    where
        F: Future<Output = ()>,
        S: FnMut(&DisplayRecord) -> std::io::Result<()>,
    {
        let (tx, mut changes) = mpsc::unbounded_channel();
        let _watcher = if self.options.watch {
            match FileWatcher::spawn(self.reader.path(), tx) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    crate::warn!("File notifications unavailable ({e}); polling only");
                    None
                }
            }
        } else {
            drop(tx);
            None
        };

        let mut ticker = tokio::time::interval(self.options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut health = PollHealth::default();
        tokio::pin!(shutdown);

        loop {
            let trigger = tokio::select! {
                () = &mut shutdown => break,
                Some(()) = changes.recv() => {
                    let skipped = drain_pending(&mut changes);
                    tracing::trace!(skipped, "coalesced change notifications");
                    Trigger::Changed
                }
                _ = ticker.tick() => Trigger::Tick,
            };

            match self.reader.poll() {
                Ok(record) => {
                    health.recovered();
                    if let Some(record) = record {
                        tracing::debug!(?trigger, text = %record.text, "record");
                        sink(&record)?;
                    }
                }
                // The cursor stays on the bad byte, so retrying cannot succeed.
                Err(e @ TailError::Encoding { .. }) => return Err(e.into()),
                Err(e) => health.failed(&e),
            }
        }

        Ok(self.reader)
    }
}

/// Discards wake-ups already queued, so a burst of events costs one poll.
fn drain_pending(changes: &mut mpsc::UnboundedReceiver<()>) -> usize {
    let mut skipped = 0;
    while changes.try_recv().is_ok() {
        skipped += 1;
    }
    skipped
}

/// Tracks poll failures so a persistent error is reported once, not every tick.
#[derive(Default)]
struct PollHealth {
    last_error: Option<String>,
    waiting: Option<Spinner>,
}

impl PollHealth {
    fn failed(&mut self, error: &TailError) {
        let message = error.to_string();
        if self.last_error.as_deref() == Some(message.as_str()) {
            return;
        }

        tracing::debug!(error = %message, "poll failed");
        if error.is_not_found() {
            let spinner = Spinner::new(&format!("{message}. Waiting..."));
            spinner.start();
            self.waiting = Some(spinner);
        } else {
            self.waiting = None;
            crate::warn!("{message}. Retrying...");
        }
        self.last_error = Some(message);
    }

    fn recovered(&mut self) {
        if self.last_error.take().is_some() {
            self.waiting = None;
            tracing::info!("log file readable again");
        }
    }
}
