mod common;

use axum::http::StatusCode;
use common::{read_data, TestApp};

#[tokio::test]
async fn listing_pages_buildings() {
    let app = TestApp::new().await;
    app.seed_building("1 First St", 1.0, 1.0).await;
    app.seed_building("2 Second St", 2.0, 2.0).await;
    app.seed_building("3 Third St", 3.0, 3.0).await;

    let response = app.get("/api/v1/buildings?offset=0&limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    assert_eq!(data.as_array().unwrap().len(), 2);

    let response = app.get("/api/v1/buildings?offset=2&limit=2").await;
    let data = read_data(response).await;
    assert_eq!(data.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_building_returns_coordinates() {
    let app = TestApp::new().await;
    let building = app.seed_building("10 Geo Pl", 55.75, 37.61).await;

    let response = app.get(&format!("/api/v1/buildings/{}", building.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    assert_eq!(data["address"], "10 Geo Pl");
    assert_eq!(data["latitude"], 55.75);
    assert_eq!(data["longitude"], 37.61);
}

#[tokio::test]
async fn get_unknown_building_returns_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/buildings/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn address_search_folds_case() {
    let app = TestApp::new().await;
    app.seed_building("12 Harbor Road", 1.0, 1.0).await;
    app.seed_building("3 Hill Street", 2.0, 2.0).await;

    let response = app
        .get("/api/v1/buildings/search/address?address=HARBOR")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    let items = data.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["address"], "12 Harbor Road");
}

#[tokio::test]
async fn empty_address_search_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/buildings/search/address?address=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
