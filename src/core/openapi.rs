use utoipa::{Modify, OpenApi};

use crate::features::contributors::{dtos as contributors_dtos, handlers as contributors_handlers};
use crate::shared::types::{ApiResponse, ResponseStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        contributors_handlers::list_contributors,
        contributors_handlers::create_contributor,
        contributors_handlers::update_contributor,
        contributors_handlers::delete_contributor,
    ),
    components(
        schemas(
            // Shared
            ResponseStatus,
            // Contributors
            contributors_dtos::ContributorRequestDto,
            contributors_dtos::ContributorResponseDto,
            ApiResponse<contributors_dtos::ContributorResponseDto>,
            ApiResponse<Vec<contributors_dtos::ContributorResponseDto>>,
        )
    ),
    tags(
        (name = "contributors", description = "Dashboard contributors (public)"),
    ),
    info(
        title = "Contributors API",
        version = "0.1.0",
        description = "API documentation for the contributors service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
