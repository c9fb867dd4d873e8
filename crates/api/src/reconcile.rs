//! Background reconciler for the registration journal.
//!
//! [`Reconciler`] runs as a background task, periodically retrying journaled
//! registrations against the primary store until each one is confirmed. The
//! journal thus behaves as a write-ahead durability buffer rather than a
//! fire-and-forget mirror.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use karvan_db::journal::RegistrationJournal;
use karvan_db::repositories::RegistrationRepo;
use karvan_db::DbPool;

/// Background service that lands unsynced journal entries in the database.
pub struct Reconciler {
    pool: DbPool,
    journal: Arc<RegistrationJournal>,
    interval: Duration,
}

impl Reconciler {
    pub fn new(pool: DbPool, journal: Arc<RegistrationJournal>, interval: Duration) -> Self {
        Self {
            pool,
            journal,
            interval,
        }
    }

    /// Run the reconcile loop.
    ///
    /// The loop exits gracefully when the provided [`CancellationToken`] is
    /// cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Reconciler cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(error = %e, "Reconcile pass failed");
                    }
                }
            }
        }
    }

    /// One reconcile pass: retry every unsynced journal entry.
    ///
    /// A reference that already exists in the database counts as landed (the
    /// original write made it in after all). Per-entry failures are logged
    /// and retried on the next pass.
    pub async fn run_once(&self) -> Result<(), karvan_db::journal::JournalError> {
        let pending = self.journal.unsynced().await?;
        if pending.is_empty() {
            return Ok(());
        }

        let mut landed = 0usize;
        for registration in &pending {
            match RegistrationRepo::insert_replay(&self.pool, registration).await {
                Ok(inserted) => {
                    if !inserted {
                        tracing::debug!(
                            reference = %registration.id,
                            "Registration already present in primary store"
                        );
                    }
                    self.journal.mark_synced(&registration.id).await?;
                    landed += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        reference = %registration.id,
                        error = %e,
                        "Primary store still rejecting journaled registration"
                    );
                }
            }
        }

        tracing::info!(
            pending = pending.len(),
            landed,
            "Reconcile pass finished"
        );
        Ok(())
    }
}
