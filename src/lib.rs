//! Directory API Library
//!
//! This crate provides the core functionality for the organization directory API
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn organization_service(&self) -> Arc<services::organizations::OrganizationService> {
        self.services.organizations.clone()
    }

    pub fn building_service(&self) -> Arc<services::buildings::BuildingService> {
        self.services.buildings.clone()
    }

    pub fn activity_service(&self) -> Arc<services::activities::ActivityService> {
        self.services.activities.clone()
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
        }
    }

    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Routes under /api/v1. Directory routes sit behind the API-key gate;
/// status and health stay open for probes.
pub fn api_v1_routes(state: AppState) -> Router<AppState> {
    let organizations = Router::new()
        .route(
            "/organizations",
            get(handlers::organizations::list_organizations),
        )
        .route(
            "/organizations/:id",
            get(handlers::organizations::get_organization),
        )
        .route(
            "/organizations/building/:building_id",
            get(handlers::organizations::get_organizations_by_building),
        )
        .route(
            "/organizations/activity/:activity_id",
            get(handlers::organizations::get_organizations_by_activity),
        )
        .route(
            "/organizations/activity-tree/:activity_id",
            get(handlers::organizations::get_organizations_by_activity_tree),
        )
        .route(
            "/organizations/search/rectangle",
            get(handlers::organizations::get_organizations_in_rectangle),
        )
        .route(
            "/organizations/search/name",
            get(handlers::organizations::search_organizations_by_name),
        );

    let buildings = Router::new()
        .route("/buildings", get(handlers::buildings::list_buildings))
        .route("/buildings/:id", get(handlers::buildings::get_building))
        .route(
            "/buildings/search/address",
            get(handlers::buildings::search_buildings_by_address),
        );

    let activities = Router::new()
        .route("/activities", get(handlers::activities::list_activities))
        .route(
            "/activities/roots",
            get(handlers::activities::get_root_activities),
        )
        .route(
            "/activities/:id",
            get(handlers::activities::get_activity_tree),
        );

    let protected = Router::new()
        .merge(organizations)
        .merge(buildings)
        .merge(activities)
        .layer(middleware::from_fn_with_state(
            state,
            auth::require_api_key,
        ));

    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .merge(protected)
}

async fn api_status() -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let version = env!("CARGO_PKG_VERSION");
    let status_data = json!({
        "status": "ok",
        "version": version,
        "service": "directory-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}
