use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::ServiceError;
use crate::handlers::common::{validate_input, PaginationQuery};
use crate::services::activities::{ActivitySummary, ActivityTree};
use crate::{ApiResponse, ApiResult, AppState};

#[utoipa::path(
    get,
    path = "/api/v1/activities",
    summary = "List activities",
    description = "Paged flat listing of the activity classification",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Activities retrieved successfully", body = ApiResponse<Vec<ActivitySummary>>),
        (status = 400, description = "Invalid pagination parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Activities"
)]
pub async fn list_activities(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Vec<ActivitySummary>> {
    validate_input(&pagination)?;
    let activities = state
        .services
        .activities
        .list(pagination.offset, pagination.limit)
        .await?;
    Ok(Json(ApiResponse::success(activities)))
}

#[utoipa::path(
    get,
    path = "/api/v1/activities/roots",
    summary = "Root activities",
    description = "Activities with no parent",
    responses(
        (status = 200, description = "Activities retrieved successfully", body = ApiResponse<Vec<ActivitySummary>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Activities"
)]
pub async fn get_root_activities(
    State(state): State<AppState>,
) -> ApiResult<Vec<ActivitySummary>> {
    let activities = state.services.activities.roots().await?;
    Ok(Json(ApiResponse::success(activities)))
}

#[utoipa::path(
    get,
    path = "/api/v1/activities/{id}",
    summary = "Get activity tree",
    description = "Get an activity with its descendant tree and parent reference",
    params(("id" = i32, Path, description = "Activity id")),
    responses(
        (status = 200, description = "Activity retrieved successfully", body = ApiResponse<ActivityTree>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Activity not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Hierarchy limit exceeded", body = crate::errors::ErrorResponse),
    ),
    security(("ApiKey" = [])),
    tag = "Activities"
)]
pub async fn get_activity_tree(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ActivityTree> {
    let activity = state
        .services
        .activities
        .activity_tree(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Activity with id {} not found", id)))?;
    Ok(Json(ApiResponse::success(activity)))
}
