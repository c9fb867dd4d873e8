//! Registration service: the dual-store write path.
//!
//! Every accepted booking lands in the Postgres primary store or, when that
//! write fails, in the fallback journal — never intentionally neither.
//! Listing reads the primary store only; journaled entries become listable
//! once the reconciler lands them.

use std::sync::Arc;

use chrono::Utc;

use karvan_core::error::CoreError;
use karvan_core::registration::{self, BookingInput};
use karvan_db::journal::RegistrationJournal;
use karvan_db::models::registration::Registration;
use karvan_db::repositories::RegistrationRepo;
use karvan_db::DbPool;

use crate::error::AppResult;

/// Outcome of a create call.
#[derive(Debug)]
pub enum CreateOutcome {
    /// The primary store accepted the write (and a best-effort mirror went
    /// into the journal).
    Stored(Registration),
    /// The primary store rejected the write; the journal holds the record
    /// until the reconciler lands it. `store_error` is the primary-store
    /// diagnostic.
    Degraded {
        registration: Registration,
        store_error: String,
    },
}

/// Orchestrates registration operations across the two stores.
pub struct RegistrationService {
    pool: DbPool,
    journal: Arc<RegistrationJournal>,
}

impl RegistrationService {
    pub fn new(pool: DbPool, journal: Arc<RegistrationJournal>) -> Self {
        Self { pool, journal }
    }

    /// The fallback journal behind this service.
    pub fn journal(&self) -> &RegistrationJournal {
        &self.journal
    }

    /// Validate, normalize and persist a booking submission.
    ///
    /// Validation failures persist nothing. A journal failure on the mirror
    /// path is logged and swallowed; a journal failure on the fallback path
    /// is a hard error, since the record would otherwise exist nowhere.
    pub async fn create(&self, input: &BookingInput) -> AppResult<CreateOutcome> {
        let new = registration::normalize(input, Utc::now())?;

        match RegistrationRepo::insert(&self.pool, &new).await {
            Ok(stored) => {
                if let Err(e) = self.journal.append(&stored, true).await {
                    tracing::warn!(
                        reference = %stored.id,
                        error = %e,
                        "Failed to mirror registration into journal"
                    );
                }
                tracing::info!(reference = %stored.id, tour = %stored.tour_title, "Registration created");
                Ok(CreateOutcome::Stored(stored))
            }
            Err(db_err) => {
                let registration: Registration = new.into();
                self.journal.append(&registration, false).await?;
                tracing::error!(
                    reference = %registration.id,
                    error = %db_err,
                    "Primary store rejected registration; journaled for reconciliation"
                );
                Ok(CreateOutcome::Degraded {
                    registration,
                    store_error: db_err.to_string(),
                })
            }
        }
    }

    /// List registrations from the primary store, newest first.
    ///
    /// A recognized `status` value filters; anything else is ignored and the
    /// full set is returned.
    pub async fn list(&self, status: Option<&str>) -> AppResult<Vec<Registration>> {
        let filter = status.filter(|s| registration::VALID_STATUSES.contains(s));
        Ok(RegistrationRepo::list(&self.pool, filter).await?)
    }

    /// Update a registration's status in the primary store, then best-effort
    /// in the journal.
    ///
    /// Re-applying the current status is permitted and advances `updatedAt`.
    pub async fn update_status(&self, reference: &str, status: &str) -> AppResult<Registration> {
        registration::validate_status(status)?;
        registration::validate_reference(reference)?;

        let now = Utc::now();
        let updated = RegistrationRepo::update_status(&self.pool, reference, status, now)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Registration",
                reference: reference.to_string(),
            })?;

        // Mirror into the journal; a miss or failure never surfaces.
        match self.journal.update_status(reference, status, now).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(reference, "No journal entry to mirror status update into")
            }
            Err(e) => {
                tracing::warn!(reference, error = %e, "Failed to mirror status update into journal")
            }
        }

        tracing::info!(reference, status, "Registration status updated");
        Ok(updated)
    }
}
