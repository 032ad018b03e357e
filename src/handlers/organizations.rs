use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

use crate::errors::ServiceError;
use crate::handlers::common::{validate_input, PaginationQuery};
use crate::services::organizations::{OrganizationDetail, OrganizationSummary};
use crate::{ApiResponse, ApiResult, AppState};

/// Rectangle bounds, inclusive. Each bound must lie in the valid geographic
/// domain; inverted bounds are legal and match nothing.
#[derive(Debug, Deserialize, Serialize, Validate, IntoParams)]
pub struct RectangleQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub min_lat: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub max_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub min_lon: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub max_lon: f64,
}

#[derive(Debug, Deserialize, Serialize, Validate, IntoParams)]
pub struct NameQuery {
    #[validate(length(min = 1))]
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    summary = "List organizations",
    description = "Paged listing of all organizations in the lightweight shape",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Organizations retrieved successfully", body = ApiResponse<Vec<OrganizationSummary>>),
        (status = 400, description = "Invalid pagination parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Organizations"
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Vec<OrganizationSummary>> {
    validate_input(&pagination)?;
    let organizations = state
        .services
        .organizations
        .list(pagination.offset, pagination.limit)
        .await?;
    Ok(Json(ApiResponse::success(organizations)))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    summary = "Get organization",
    description = "Get an organization by id with building, activities, and phone numbers attached",
    params(("id" = i32, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization retrieved successfully", body = ApiResponse<OrganizationDetail>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Organization not found", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Organizations"
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<OrganizationDetail> {
    let organization = state
        .services
        .organizations
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Organization with id {} not found", id)))?;
    Ok(Json(ApiResponse::success(organization)))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/building/{building_id}",
    summary = "Organizations by building",
    description = "All organizations occupying the given building",
    params(("building_id" = i32, Path, description = "Building id")),
    responses(
        (status = 200, description = "Organizations retrieved successfully", body = ApiResponse<Vec<OrganizationDetail>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Organizations"
)]
pub async fn get_organizations_by_building(
    State(state): State<AppState>,
    Path(building_id): Path<i32>,
) -> ApiResult<Vec<OrganizationDetail>> {
    let organizations = state.services.organizations.by_building(building_id).await?;
    Ok(Json(ApiResponse::success(organizations)))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/activity/{activity_id}",
    summary = "Organizations by activity",
    description = "Organizations associated with exactly this activity",
    params(("activity_id" = i32, Path, description = "Activity id")),
    responses(
        (status = 200, description = "Organizations retrieved successfully", body = ApiResponse<Vec<OrganizationDetail>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Organizations"
)]
pub async fn get_organizations_by_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<i32>,
) -> ApiResult<Vec<OrganizationDetail>> {
    let organizations = state.services.organizations.by_activity(activity_id).await?;
    Ok(Json(ApiResponse::success(organizations)))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/activity-tree/{activity_id}",
    summary = "Organizations by activity tree",
    description = "Organizations associated with the activity or any of its descendants",
    params(("activity_id" = i32, Path, description = "Root activity id")),
    responses(
        (status = 200, description = "Organizations retrieved successfully", body = ApiResponse<Vec<OrganizationDetail>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 422, description = "Hierarchy limit exceeded", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Organizations"
)]
pub async fn get_organizations_by_activity_tree(
    State(state): State<AppState>,
    Path(activity_id): Path<i32>,
) -> ApiResult<Vec<OrganizationDetail>> {
    let organizations = state
        .services
        .organizations
        .by_activity_tree(activity_id)
        .await?;
    Ok(Json(ApiResponse::success(organizations)))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/search/rectangle",
    summary = "Organizations in rectangle",
    description = "Organizations whose building lies inside the bounding box, bounds inclusive",
    params(RectangleQuery),
    responses(
        (status = 200, description = "Organizations retrieved successfully", body = ApiResponse<Vec<OrganizationDetail>>),
        (status = 400, description = "Bounds outside the valid lat/lon domain", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Organizations"
)]
pub async fn get_organizations_in_rectangle(
    State(state): State<AppState>,
    Query(rectangle): Query<RectangleQuery>,
) -> ApiResult<Vec<OrganizationDetail>> {
    validate_input(&rectangle)?;
    let organizations = state
        .services
        .organizations
        .in_rectangle(
            rectangle.min_lat,
            rectangle.max_lat,
            rectangle.min_lon,
            rectangle.max_lon,
        )
        .await?;
    Ok(Json(ApiResponse::success(organizations)))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/search/name",
    summary = "Search organizations by name",
    description = "Case-insensitive substring search over organization names",
    params(NameQuery),
    responses(
        (status = 200, description = "Organizations retrieved successfully", body = ApiResponse<Vec<OrganizationDetail>>),
        (status = 400, description = "Empty search string", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Organizations"
)]
pub async fn search_organizations_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> ApiResult<Vec<OrganizationDetail>> {
    validate_input(&query)?;
    let organizations = state
        .services
        .organizations
        .search_by_name(&query.name)
        .await?;
    Ok(Json(ApiResponse::success(organizations)))
}
