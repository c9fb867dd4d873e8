//! Handlers for booking registrations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use karvan_core::registration::BookingInput;
use karvan_db::models::registration::Registration;

use crate::error::AppResult;
use crate::response::{ApiResponse, DegradedResponse};
use crate::service::CreateOutcome;
use crate::state::AppState;

/// Query parameters for the admin listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

/// Body of a status update.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /api/registrations
// ---------------------------------------------------------------------------

/// Accept a booking submission.
///
/// 201 on a primary-store write, 202 when only the fallback journal holds
/// the record (degraded success), 400 on validation failure.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<BookingInput>,
) -> AppResult<impl IntoResponse> {
    match state.registrations.create(&input).await? {
        CreateOutcome::Stored(registration) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::new("Registration created", registration)),
        )
            .into_response()),
        CreateOutcome::Degraded {
            registration,
            store_error,
        } => {
            // Store diagnostics only leave the process in development mode.
            let detail = state
                .config
                .environment
                .is_development()
                .then_some(store_error);
            Ok((
                StatusCode::ACCEPTED,
                Json(DegradedResponse::new(
                    "Registration accepted; primary store unavailable, queued for reconciliation",
                    registration,
                    detail,
                )),
            )
                .into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// GET /api/admin/registrations
// ---------------------------------------------------------------------------

/// List registrations, newest first, optionally filtered by status.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Registration>>> {
    let items = state.registrations.list(params.status.as_deref()).await?;
    tracing::debug!(count = items.len(), "Listed registrations");
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/registrations/{id}
// ---------------------------------------------------------------------------

/// Update a registration's status (`done` or `undone`).
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusBody>,
) -> AppResult<impl IntoResponse> {
    let status = body.status.unwrap_or_default();
    let updated = state.registrations.update_status(&id, &status).await?;
    Ok(Json(ApiResponse::new(
        format!("Registration marked {status}"),
        updated,
    )))
}
