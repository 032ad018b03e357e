#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use directory_api::{
    config::AppConfig,
    db,
    entities::{activity, building, organization, organization_activity, phone_number},
    handlers::AppServices,
    AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

/// Shared secret the test application is configured with.
pub const TEST_API_KEY: &str = "test-api-key-123";

/// Helper harness for spinning up an application state backed by an
/// in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            TEST_API_KEY.to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single pooled connection keeps every query on the same in-memory
        // database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let services = AppServices::new(db_arc.clone());

        let state = AppState {
            db: db_arc,
            config: cfg,
            services,
        };

        let router = Router::new()
            .nest("/api/v1", directory_api::api_v1_routes(state.clone()))
            .with_state(state.clone());

        Self { router, state }
    }

    /// Send a GET request with an optional API key.
    pub async fn request(&self, uri: &str, api_key: Option<&str>) -> axum::response::Response {
        let mut builder = Request::builder().method(Method::GET).uri(uri);

        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }

        let request = builder
            .body(Body::empty())
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for authenticated GET requests.
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request(uri, Some(TEST_API_KEY)).await
    }

    pub async fn seed_building(
        &self,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> building::Model {
        building::ActiveModel {
            address: Set(address.to_string()),
            latitude: Set(latitude),
            longitude: Set(longitude),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("insert building")
    }

    pub async fn seed_activity(
        &self,
        name: &str,
        parent_id: Option<i32>,
        level: i32,
    ) -> activity::Model {
        activity::ActiveModel {
            name: Set(name.to_string()),
            parent_id: Set(parent_id),
            level: Set(level),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("insert activity")
    }

    pub async fn seed_organization(&self, name: &str, building_id: i32) -> organization::Model {
        organization::ActiveModel {
            name: Set(name.to_string()),
            building_id: Set(building_id),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("insert organization")
    }

    pub async fn seed_phone(&self, organization_id: i32, number: &str) -> phone_number::Model {
        phone_number::ActiveModel {
            number: Set(number.to_string()),
            organization_id: Set(organization_id),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("insert phone number")
    }

    pub async fn link_activity(&self, organization_id: i32, activity_id: i32) {
        organization_activity::ActiveModel {
            organization_id: Set(organization_id),
            activity_id: Set(activity_id),
        }
        .insert(&*self.state.db)
        .await
        .expect("insert organization-activity link");
    }
}

/// Read a response body as JSON.
pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Unwrap the `data` field of a successful API envelope.
pub async fn read_data(response: axum::response::Response) -> Value {
    let body = read_json(response).await;
    assert_eq!(body["success"], Value::Bool(true), "body: {}", body);
    body["data"].clone()
}
