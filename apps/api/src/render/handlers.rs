//! Axum route handlers for the page and the render API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::render::{
    build_view, default_selection, role_options, Fragments, RoleOption, RoleView, Selection,
};
use crate::state::{AppState, CatalogState};

/// GET /
///
/// Page shell with the selector populated and the first role pre-rendered.
/// Answers 503 with a visible error page when the document failed to load.
pub async fn handle_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let catalog = match &state.catalog {
        CatalogState::Ready(catalog) => catalog,
        CatalogState::Failed(message) => {
            let page = state.markup.render_error_page(message)?;
            return Ok((StatusCode::SERVICE_UNAVAILABLE, Html(page)).into_response());
        }
    };

    let view = build_view(catalog, &default_selection(catalog))?;
    let fragments = state.markup.render_fragments(&view)?;
    let page = state.markup.render_page(&role_options(catalog), &fragments)?;
    Ok(Html(page).into_response())
}

/// GET /api/v1/roles
pub async fn handle_roles(State(state): State<AppState>) -> Result<Json<Vec<RoleOption>>, AppError> {
    Ok(Json(role_options(state.catalog()?)))
}

/// GET /api/v1/render?role=A&role=B
///
/// Returns the three region fragments for the selection. An empty selection
/// yields three empty strings so the page clears stale markup.
pub async fn handle_render(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Fragments>, AppError> {
    let selection = Selection::from_query_pairs(&pairs);
    debug!("Rendering fragments for {:?}", selection.roles());

    let view = build_view(state.catalog()?, &selection)?;
    Ok(Json(state.markup.render_fragments(&view)?))
}

/// GET /api/v1/view?role=A&role=B
///
/// Structured view model behind the fragments.
pub async fn handle_view(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<RoleView>, AppError> {
    let selection = Selection::from_query_pairs(&pairs);
    Ok(Json(build_view(state.catalog()?, &selection)?))
}
