//! Registration entity model.

use karvan_core::registration::NewRegistration;
use karvan_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booking registration as stored and served.
///
/// `id` is the canonical reference token minted at the service boundary;
/// repository queries alias the `reference` column onto it so the internal
/// BIGSERIAL key never leaves the storage layer. Wire field names are
/// camelCase for compatibility with the existing site.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tour_title: String,
    pub people: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub status: String,
    pub message: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl From<NewRegistration> for Registration {
    fn from(new: NewRegistration) -> Self {
        Self {
            id: new.reference,
            name: new.name,
            email: new.email,
            phone: new.phone,
            tour_title: new.tour_title,
            people: new.people,
            unit_price: new.unit_price,
            total_price: new.total_price,
            status: new.status,
            message: new.message,
            created_at: new.created_at,
            updated_at: None,
        }
    }
}
