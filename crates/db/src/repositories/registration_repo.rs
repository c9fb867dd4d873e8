//! Repository for the `registrations` table.

use karvan_core::registration::NewRegistration;
use karvan_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::registration::Registration;

// The reference column is aliased onto `id`: the BIGSERIAL key is internal.
const COLUMNS: &str = "\
    reference AS id, name, email, phone, tour_title, people, \
    unit_price, total_price, status, message, created_at, updated_at";

/// CRUD operations for booking registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert a freshly normalized registration.
    pub async fn insert(
        pool: &PgPool,
        new: &NewRegistration,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations \
                 (reference, name, email, phone, tour_title, people, \
                  unit_price, total_price, status, message, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(&new.reference)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.phone)
            .bind(&new.tour_title)
            .bind(new.people)
            .bind(new.unit_price)
            .bind(new.total_price)
            .bind(&new.status)
            .bind(&new.message)
            .bind(new.created_at)
            .fetch_one(pool)
            .await
    }

    /// Replay a journaled registration into the database, preserving its
    /// reference, status, and timestamps.
    ///
    /// Returns `false` when a row with the same reference already exists,
    /// which the reconciler also counts as success.
    pub async fn insert_replay(
        pool: &PgPool,
        reg: &Registration,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO registrations \
                 (reference, name, email, phone, tour_title, people, \
                  unit_price, total_price, status, message, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (reference) DO NOTHING",
        )
        .bind(&reg.id)
        .bind(&reg.name)
        .bind(&reg.email)
        .bind(&reg.phone)
        .bind(&reg.tour_title)
        .bind(reg.people)
        .bind(reg.unit_price)
        .bind(reg.total_price)
        .bind(&reg.status)
        .bind(&reg.message)
        .bind(reg.created_at)
        .bind(reg.updated_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List registrations, newest first, optionally filtered by status.
    ///
    /// The caller is responsible for only passing recognized status values;
    /// `None` returns the full set.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM registrations \
                     WHERE status = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Registration>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM registrations ORDER BY created_at DESC");
                sqlx::query_as::<_, Registration>(&query).fetch_all(pool).await
            }
        }
    }

    /// Find a registration by its reference token.
    pub async fn find_by_reference(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations WHERE reference = $1");
        sqlx::query_as::<_, Registration>(&query)
            .bind(reference)
            .fetch_optional(pool)
            .await
    }

    /// Update a registration's status, stamping `updated_at`.
    ///
    /// Returns `None` when no row carries the given reference.
    pub async fn update_status(
        pool: &PgPool,
        reference: &str,
        status: &str,
        updated_at: Timestamp,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "UPDATE registrations SET status = $2, updated_at = $3 \
             WHERE reference = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(reference)
            .bind(status)
            .bind(updated_at)
            .fetch_optional(pool)
            .await
    }
}
