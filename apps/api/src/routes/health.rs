use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::{AppState, CatalogState};

/// GET /health
/// Reports `degraded` when the mapping document failed to load.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let (status, roles) = match &state.catalog {
        CatalogState::Ready(catalog) => ("ok", catalog.role_count()),
        CatalogState::Failed(_) => ("degraded", 0),
    };

    Json(json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillmap",
        "roles": roles,
        "mapping_source": state.config.mapping_source
    }))
}
