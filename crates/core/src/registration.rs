//! Booking registration validation and normalization.
//!
//! Turns an untrusted client payload ([`BookingInput`]) into a normalized
//! [`NewRegistration`] ready for persistence, or a validation error. Numeric
//! fields arrive as raw JSON values because clients historically send them
//! as either numbers or numeric strings; coercion mirrors that tolerance.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

/* --------------------------------------------------------------------------
   Status constants
   -------------------------------------------------------------------------- */

/// Initial status of every accepted registration.
pub const STATUS_UNDONE: &str = "undone";

/// Status set by an administrator once the booking has been handled.
pub const STATUS_DONE: &str = "done";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_UNDONE, STATUS_DONE];

/* --------------------------------------------------------------------------
   Input & normalized record
   -------------------------------------------------------------------------- */

/// Raw booking submission as received from the client. All fields optional
/// so that presence is checked here, not by deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tour_title: Option<String>,
    pub people: Option<serde_json::Value>,
    pub unit_price: Option<serde_json::Value>,
    pub total_price: Option<serde_json::Value>,
    pub message: Option<String>,
}

/// A validated, normalized registration about to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    /// Canonical client-facing id, minted at the service boundary.
    pub reference: String,
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
}

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate that `status` is one of the allowed values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a registration reference: a non-empty opaque token.
///
/// References are treated as opaque; a well-formed but unknown token is a
/// lookup miss (404), never a validation error.
pub fn validate_reference(reference: &str) -> Result<(), CoreError> {
    if reference.trim().is_empty() {
        return Err(CoreError::Validation(
            "Registration id must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Mint a new canonical registration reference.
///
/// Every accepted registration gets one of these regardless of which store
/// ends up holding it; the database's serial key stays internal.
pub fn mint_reference() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Validate and normalize a raw booking submission.
///
/// - `name`, `email`, `phone`, `tourTitle` must be present and non-blank.
/// - `totalPrice` must be present, numeric (number or numeric string),
///   finite, and strictly greater than zero.
/// - `people` defaults to 1 when absent, non-numeric, or non-positive.
/// - `unitPrice` defaults to 0 when absent or non-numeric; negative values
///   are clamped to 0.
/// - `message` falls back to a derived human-readable summary.
pub fn normalize(input: &BookingInput, now: Timestamp) -> Result<NewRegistration, CoreError> {
    let name = require_text(&input.name, "name")?;
    let email = require_text(&input.email, "email")?;
    let phone = require_text(&input.phone, "phone")?;
    let tour_title = require_text(&input.tour_title, "tourTitle")?;

    let total_price = match input.total_price.as_ref().and_then(coerce_number) {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            return Err(CoreError::Validation(
                "totalPrice must be a positive number".to_string(),
            ))
        }
    };

    let people = match input.people.as_ref().and_then(coerce_number) {
        Some(v) if v.is_finite() && v >= 1.0 => v as i64,
        _ => 1,
    };

    let unit_price = match input.unit_price.as_ref().and_then(coerce_number) {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    };

    let message = match input.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => derive_message(&tour_title, people, total_price),
    };

    Ok(NewRegistration {
        reference: mint_reference(),
        name,
        email,
        phone,
        tour_title,
        people,
        unit_price,
        total_price,
        status: STATUS_UNDONE.to_string(),
        message,
        created_at: now,
    })
}

/// Default human-readable summary for a booking without a client message.
pub fn derive_message(tour_title: &str, people: i64, total_price: f64) -> String {
    format!("Booking request for '{tour_title}': {people} traveller(s), total {total_price}")
}

/// Require a trimmed, non-empty string field.
fn require_text(value: &Option<String>, field: &str) -> Result<String, CoreError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!(
            "Field '{field}' is required"
        ))),
    }
}

/// Coerce a JSON value to a number: accepts numbers and numeric strings.
fn coerce_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
