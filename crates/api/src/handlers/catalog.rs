//! Handlers for the static catalog documents.

use axum::extract::{Path, State};
use axum::Json;

use karvan_core::catalog::CatalogTopic;
use karvan_core::error::CoreError;

use crate::catalog::CatalogError;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/{topic} -- serve a catalog document.
///
/// An unknown topic or a missing backing file is a 404; a document that
/// fails to parse is a 500 (deployment defect, not client error).
pub async fn get_topic(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let topic = CatalogTopic::parse(&segment).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Catalog topic",
        reference: segment.clone(),
    }))?;

    match state.catalog.read(topic).await {
        Ok(doc) => Ok(Json(doc)),
        Err(CatalogError::NotFound(topic)) => Err(AppError::Core(CoreError::NotFound {
            entity: "Catalog topic",
            reference: topic.to_string(),
        })),
        Err(e) => {
            tracing::error!(%topic, error = %e, "Failed to serve catalog document");
            Err(AppError::InternalError(e.to_string()))
        }
    }
}
