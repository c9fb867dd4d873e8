//! Shared response envelope types for API handlers.
//!
//! Successful mutations use the site's `{success, message, data}` envelope.
//! The degraded-success path (primary store down, journal accepted the
//! write) gets its own envelope so callers can tell the three outcomes
//! apart: 201 full success, 202 degraded success, 4xx/5xx failure.

use serde::Serialize;

/// Standard `{success:true, message, data}` success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Envelope for registrations accepted into the fallback journal only.
///
/// `storeError` carries the primary-store diagnostic and is only populated
/// in development mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradedResponse<T: Serialize> {
    pub success: bool,
    pub degraded: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
}

impl<T: Serialize> DegradedResponse<T> {
    pub fn new(message: impl Into<String>, data: T, store_error: Option<String>) -> Self {
        Self {
            success: true,
            degraded: true,
            message: message.into(),
            data,
            store_error,
        }
    }
}
