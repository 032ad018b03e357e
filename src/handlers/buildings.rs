use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

use crate::errors::ServiceError;
use crate::handlers::common::{validate_input, PaginationQuery};
use crate::services::buildings::BuildingResponse;
use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Deserialize, Serialize, Validate, IntoParams)]
pub struct AddressQuery {
    #[validate(length(min = 1))]
    pub address: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/buildings",
    summary = "List buildings",
    description = "Paged listing of all buildings",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Buildings retrieved successfully", body = ApiResponse<Vec<BuildingResponse>>),
        (status = 400, description = "Invalid pagination parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Buildings"
)]
pub async fn list_buildings(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Vec<BuildingResponse>> {
    validate_input(&pagination)?;
    let buildings = state
        .services
        .buildings
        .list(pagination.offset, pagination.limit)
        .await?;
    Ok(Json(ApiResponse::success(buildings)))
}

#[utoipa::path(
    get,
    path = "/api/v1/buildings/{id}",
    summary = "Get building",
    description = "Get a building by id",
    params(("id" = i32, Path, description = "Building id")),
    responses(
        (status = 200, description = "Building retrieved successfully", body = ApiResponse<BuildingResponse>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Building not found", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Buildings"
)]
pub async fn get_building(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<BuildingResponse> {
    let building = state
        .services
        .buildings
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Building with id {} not found", id)))?;
    Ok(Json(ApiResponse::success(building)))
}

#[utoipa::path(
    get,
    path = "/api/v1/buildings/search/address",
    summary = "Search buildings by address",
    description = "Case-insensitive substring search over building addresses",
    params(AddressQuery),
    responses(
        (status = 200, description = "Buildings retrieved successfully", body = ApiResponse<Vec<BuildingResponse>>),
        (status = 400, description = "Empty search string", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Buildings"
)]
pub async fn search_buildings_by_address(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> ApiResult<Vec<BuildingResponse>> {
    validate_input(&query)?;
    let buildings = state
        .services
        .buildings
        .search_by_address(&query.address)
        .await?;
    Ok(Json(ApiResponse::success(buildings)))
}
