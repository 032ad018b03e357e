mod common;

use axum::http::StatusCode;
use common::{read_data, read_json, TestApp};

#[tokio::test]
async fn listing_pages_organizations_in_summary_shape() {
    let app = TestApp::new().await;
    let building = app.seed_building("1 Main St", 10.0, 20.0).await;
    for name in ["Alpha", "Beta", "Gamma"] {
        app.seed_organization(name, building.id).await;
    }

    let response = app.get("/api/v1/organizations?offset=1&limit=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    let items = data.as_array().expect("array of summaries");
    assert_eq!(items.len(), 1);
    // Summary shape carries no nested detail.
    assert!(items[0].get("phone_numbers").is_none());
    assert!(items[0]["building_id"].is_number());
}

#[tokio::test]
async fn listing_rejects_out_of_range_limit() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/organizations?limit=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/api/v1/organizations?limit=1001").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_organization_returns_nested_details() {
    let app = TestApp::new().await;
    let building = app.seed_building("5 Harbor Rd", 1.0, 2.0).await;
    let activity = app.seed_activity("Food", None, 1).await;
    let org = app.seed_organization("Harbor Cafe", building.id).await;
    app.seed_phone(org.id, "2-222-222").await;
    app.seed_phone(org.id, "3-333-333").await;
    app.link_activity(org.id, activity.id).await;

    let response = app.get(&format!("/api/v1/organizations/{}", org.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    assert_eq!(data["name"], "Harbor Cafe");
    assert_eq!(data["building"]["address"], "5 Harbor Rd");
    assert_eq!(data["phone_numbers"].as_array().unwrap().len(), 2);
    assert_eq!(data["activities"].as_array().unwrap().len(), 1);
    assert_eq!(data["activities"][0]["name"], "Food");
}

#[tokio::test]
async fn get_unknown_organization_returns_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/organizations/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn organizations_by_building_returns_each_with_own_relations() {
    let app = TestApp::new().await;
    let building = app.seed_building("7 Factory Ln", 30.0, 40.0).await;
    let other = app.seed_building("9 Other St", 31.0, 41.0).await;

    let food = app.seed_activity("Food", None, 1).await;
    let retail = app.seed_activity("Retail", None, 1).await;

    let bakery = app.seed_organization("Bakery", building.id).await;
    let grocery = app.seed_organization("Grocery", building.id).await;
    app.seed_organization("Elsewhere", other.id).await;

    app.seed_phone(bakery.id, "1-111").await;
    app.seed_phone(grocery.id, "2-222").await;
    app.seed_phone(grocery.id, "3-333").await;
    app.link_activity(bakery.id, food.id).await;
    app.link_activity(grocery.id, retail.id).await;

    let response = app
        .get(&format!("/api/v1/organizations/building/{}", building.id))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    let items = data.as_array().expect("array of details");
    assert_eq!(items.len(), 2);

    for item in items {
        assert_eq!(item["building_id"], building.id);
        match item["name"].as_str().unwrap() {
            "Bakery" => {
                assert_eq!(item["phone_numbers"].as_array().unwrap().len(), 1);
                assert_eq!(item["activities"][0]["name"], "Food");
            }
            "Grocery" => {
                assert_eq!(item["phone_numbers"].as_array().unwrap().len(), 2);
                assert_eq!(item["activities"][0]["name"], "Retail");
            }
            other => panic!("unexpected organization {}", other),
        }
    }
}

#[tokio::test]
async fn activity_tree_search_includes_descendants_but_plain_search_does_not() {
    let app = TestApp::new().await;
    let building = app.seed_building("2 Deep Rd", 5.0, 5.0).await;

    let food = app.seed_activity("Food", None, 1).await;
    let dairy = app.seed_activity("Dairy", Some(food.id), 2).await;
    let cheese = app.seed_activity("Cheese", Some(dairy.id), 3).await;

    let org = app.seed_organization("Cheesemonger", building.id).await;
    app.link_activity(org.id, cheese.id).await;

    // The descendant search starting from the grandparent finds the
    // organization tagged only with the leaf.
    let response = app
        .get(&format!("/api/v1/organizations/activity-tree/{}", food.id))
        .await;
    let data = read_data(response).await;
    let items = data.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Cheesemonger");

    // The exact-activity search does not.
    let response = app
        .get(&format!("/api/v1/organizations/activity/{}", food.id))
        .await;
    let data = read_data(response).await;
    assert_eq!(data.as_array().unwrap().len(), 0);

    // Searching by the leaf itself works in both modes.
    let response = app
        .get(&format!("/api/v1/organizations/activity/{}", cheese.id))
        .await;
    let data = read_data(response).await;
    assert_eq!(data.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn organization_with_several_matching_activities_appears_once() {
    let app = TestApp::new().await;
    let building = app.seed_building("3 Combo Ave", 0.0, 0.0).await;

    let food = app.seed_activity("Food", None, 1).await;
    let meat = app.seed_activity("Meat", Some(food.id), 2).await;
    let dairy = app.seed_activity("Dairy", Some(food.id), 2).await;

    let org = app.seed_organization("General Store", building.id).await;
    app.link_activity(org.id, food.id).await;
    app.link_activity(org.id, meat.id).await;
    app.link_activity(org.id, dairy.id).await;

    let response = app
        .get(&format!("/api/v1/organizations/activity-tree/{}", food.id))
        .await;
    let data = read_data(response).await;
    let items = data.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["activities"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_activity_matches_nothing() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/organizations/activity-tree/424242").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    assert_eq!(data.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rectangle_bounds_are_inclusive() {
    let app = TestApp::new().await;
    let on_corner = app.seed_building("Corner", 10.0, 20.0).await;
    let inside = app.seed_building("Inside", 12.5, 25.0).await;
    let outside = app.seed_building("Outside", 50.0, 60.0).await;

    app.seed_organization("Corner Org", on_corner.id).await;
    app.seed_organization("Inside Org", inside.id).await;
    app.seed_organization("Outside Org", outside.id).await;

    let response = app
        .get("/api/v1/organizations/search/rectangle?min_lat=10&max_lat=15&min_lon=20&max_lon=30")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    let names: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Corner Org"));
    assert!(names.contains(&"Inside Org"));
}

#[tokio::test]
async fn inverted_rectangle_yields_empty_result() {
    let app = TestApp::new().await;
    let building = app.seed_building("Somewhere", 10.0, 20.0).await;
    app.seed_organization("Org", building.id).await;

    let response = app
        .get("/api/v1/organizations/search/rectangle?min_lat=15&max_lat=10&min_lon=20&max_lon=30")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    assert_eq!(data.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rectangle_outside_geographic_domain_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .get("/api/v1/organizations/search/rectangle?min_lat=-91&max_lat=10&min_lon=0&max_lon=10")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .get("/api/v1/organizations/search/rectangle?min_lat=0&max_lat=10&min_lon=0&max_lon=181")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn name_search_is_case_insensitive_for_cyrillic() {
    let app = TestApp::new().await;
    let building = app.seed_building("4 Milk Way", 0.0, 0.0).await;
    app.seed_organization("ООО \"Молоко\"", building.id).await;
    app.seed_organization("Bread Ltd", building.id).await;

    let response = app
        .get("/api/v1/organizations/search/name?name=%D0%BC%D0%BE%D0%BB%D0%BE%D0%BA%D0%BE")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    let items = data.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "ООО \"Молоко\"");
}

#[tokio::test]
async fn empty_name_search_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/organizations/search/name?name=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn requests_without_valid_api_key_are_rejected() {
    let app = TestApp::new().await;

    let response = app.request("/api/v1/organizations", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.request("/api/v1/organizations", Some("wrong-key")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn status_and_health_stay_open() {
    let app = TestApp::new().await;

    let response = app.request("/api/v1/status", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request("/api/v1/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
