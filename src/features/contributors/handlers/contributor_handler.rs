//! Contributor handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::contributors::dtos::{
    ContributorQueryParams, ContributorRequestDto, ContributorResponseDto,
};
use crate::features::contributors::services::ContributorService;
use crate::shared::types::ApiResponse;

/// List contributors
///
/// Supports pagination (`pagesize`, `pagenum`), sorting (`sort`, `order`) and
/// filtering (`searchbyid`, `searchbyname`). `total` counts every contributor,
/// `results` counts those matching the filters.
#[utoipa::path(
    get,
    path = "/api/v1/contributor",
    params(ContributorQueryParams),
    responses(
        (status = 200, description = "Contributors retrieved successfully", body = ApiResponse<Vec<ContributorResponseDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Store failure")
    ),
    tag = "contributors"
)]
pub async fn list_contributors(
    State(service): State<Arc<ContributorService>>,
    AppQuery(params): AppQuery<ContributorQueryParams>,
) -> Result<Json<ApiResponse<Vec<ContributorResponseDto>>>> {
    tracing::debug!("Listing contributors: {:?}", params);
    let query = params.to_list_query()?;
    let listing = service.list(&query).await?;

    Ok(Json(ApiResponse::list(
        listing.items,
        listing.total,
        listing.results,
    )))
}

/// Create a contributor
#[utoipa::path(
    post,
    path = "/api/v1/contributor",
    request_body = ContributorRequestDto,
    responses(
        (status = 200, description = "Contributor created successfully", body = ApiResponse<ContributorResponseDto>),
        (status = 400, description = "Missing name or malformed body")
    ),
    tag = "contributors"
)]
pub async fn create_contributor(
    State(service): State<Arc<ContributorService>>,
    AppJson(dto): AppJson<ContributorRequestDto>,
) -> Result<Json<ApiResponse<ContributorResponseDto>>> {
    let contributor = service.create(dto).await?;
    Ok(Json(ApiResponse::success(Some(contributor), None)))
}

/// Update a contributor
///
/// Replaces name, link and image; omitted optional fields are cleared.
#[utoipa::path(
    patch,
    path = "/api/v1/contributor/{id}",
    params(
        ("id" = i64, Path, description = "Contributor ID")
    ),
    request_body = ContributorRequestDto,
    responses(
        (status = 200, description = "Contributor updated successfully", body = ApiResponse<ContributorResponseDto>),
        (status = 400, description = "Missing name or malformed body"),
        (status = 404, description = "Contributor not found")
    ),
    tag = "contributors"
)]
pub async fn update_contributor(
    State(service): State<Arc<ContributorService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<ContributorRequestDto>,
) -> Result<Json<ApiResponse<ContributorResponseDto>>> {
    let contributor = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(contributor), None)))
}

/// Delete a contributor
#[utoipa::path(
    delete,
    path = "/api/v1/contributor/{id}",
    params(
        ("id" = i64, Path, description = "Contributor ID")
    ),
    responses(
        (status = 200, description = "Contributor deleted successfully", body = ApiResponse<ContributorResponseDto>),
        (status = 404, description = "Contributor not found")
    ),
    tag = "contributors"
)]
pub async fn delete_contributor(
    State(service): State<Arc<ContributorService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<ContributorResponseDto>>> {
    let contributor = service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(contributor),
        Some("Contributor deleted".to_string()),
    )))
}
