use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::config::ServerConfig;
use crate::service::RegistrationService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: karvan_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Static catalog documents.
    pub catalog: Arc<CatalogStore>,
    /// Registration service (dual-store create/list/update policy).
    pub registrations: Arc<RegistrationService>,
}
