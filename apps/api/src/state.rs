use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::errors::AppError;
use crate::render::Markup;

/// Outcome of the one startup load.
#[derive(Debug, Clone)]
pub enum CatalogState {
    Ready(Arc<Catalog>),
    /// Load failed; the message is shown to users instead of a blank page.
    Failed(String),
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogState,
    pub markup: Arc<Markup>,
    pub config: Config,
}

impl AppState {
    pub fn catalog(&self) -> Result<&Catalog, AppError> {
        match &self.catalog {
            CatalogState::Ready(catalog) => Ok(catalog.as_ref()),
            CatalogState::Failed(message) => Err(AppError::CatalogUnavailable(message.clone())),
        }
    }
}
