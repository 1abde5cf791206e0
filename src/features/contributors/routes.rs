//! Contributor routes

use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::contributors::handlers;
use crate::features::contributors::services::ContributorService;

/// Create routes for the contributors feature (public, no authentication)
pub fn routes(service: Arc<ContributorService>) -> Router {
    Router::new()
        .route(
            "/api/v1/contributor",
            get(handlers::list_contributors).post(handlers::create_contributor),
        )
        .route(
            "/api/v1/contributor/{id}",
            patch(handlers::update_contributor).delete(handlers::delete_contributor),
        )
        .with_state(service)
}
