mod common;

use axum::http::StatusCode;
use common::{read_data, TestApp};
use directory_api::entities::activity;
use directory_api::errors::ServiceError;
use directory_api::services::activities::MAX_CLOSURE_NODES;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

#[tokio::test]
async fn closure_of_leaf_is_exactly_the_root() {
    let app = TestApp::new().await;
    let leaf = app.seed_activity("Leaf", None, 1).await;

    let closure = app
        .state
        .services
        .activities
        .descendant_closure(leaf.id)
        .await
        .expect("closure");
    assert_eq!(closure.len(), 1);
    assert!(closure.contains(&leaf.id));
}

#[tokio::test]
async fn closure_covers_all_and_only_reachable_nodes() {
    let app = TestApp::new().await;
    let root = app.seed_activity("Root", None, 1).await;
    let child_a = app.seed_activity("A", Some(root.id), 2).await;
    let child_b = app.seed_activity("B", Some(root.id), 2).await;
    let grandchild = app.seed_activity("A1", Some(child_a.id), 3).await;
    let unrelated = app.seed_activity("Unrelated", None, 1).await;

    let closure = app
        .state
        .services
        .activities
        .descendant_closure(root.id)
        .await
        .expect("closure");

    assert_eq!(closure.len(), 4);
    for id in [root.id, child_a.id, child_b.id, grandchild.id] {
        assert!(closure.contains(&id));
    }
    assert!(!closure.contains(&unrelated.id));
}

#[tokio::test]
async fn closure_of_unknown_root_is_empty() {
    let app = TestApp::new().await;

    let closure = app
        .state
        .services
        .activities
        .descendant_closure(424242)
        .await
        .expect("closure");
    assert!(closure.is_empty());
}

#[tokio::test]
async fn closure_terminates_on_cyclic_data() {
    let app = TestApp::new().await;
    let top = app.seed_activity("Top", None, 1).await;
    let middle = app.seed_activity("Middle", Some(top.id), 2).await;
    let bottom = app.seed_activity("Bottom", Some(middle.id), 3).await;

    // Corrupt the forest: point the top node's parent at its own descendant.
    activity::ActiveModel {
        id: Set(top.id),
        parent_id: Set(Some(bottom.id)),
        ..Default::default()
    }
    .update(&*app.state.db)
    .await
    .expect("create cycle");

    let closure = app
        .state
        .services
        .activities
        .descendant_closure(top.id)
        .await
        .expect("closure terminates despite the cycle");

    assert_eq!(closure.len(), 3);
    for id in [top.id, middle.id, bottom.id] {
        assert!(closure.contains(&id));
    }
}

#[tokio::test]
async fn closure_past_the_node_bound_is_reported() {
    let app = TestApp::new().await;
    let root = app.seed_activity("Wide Root", None, 1).await;

    // One more child than the traversal bound allows.
    let mut pending: Vec<activity::ActiveModel> = Vec::new();
    for i in 0..MAX_CLOSURE_NODES {
        pending.push(activity::ActiveModel {
            name: Set(format!("Child {}", i)),
            parent_id: Set(Some(root.id)),
            level: Set(2),
            ..Default::default()
        });
        if pending.len() == 500 {
            activity::Entity::insert_many(pending.split_off(0))
                .exec(&*app.state.db)
                .await
                .expect("insert children batch");
        }
    }
    if !pending.is_empty() {
        activity::Entity::insert_many(pending)
            .exec(&*app.state.db)
            .await
            .expect("insert children batch");
    }

    let err = app
        .state
        .services
        .activities
        .descendant_closure(root.id)
        .await
        .expect_err("bound exceeded");
    assert!(matches!(err, ServiceError::HierarchyLimitExceeded(_)));

    // The same condition surfaces as 422 through the organization search.
    let response = app
        .get(&format!("/api/v1/organizations/activity-tree/{}", root.id))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn activity_tree_endpoint_nests_children_and_parent() {
    let app = TestApp::new().await;
    let food = app.seed_activity("Food", None, 1).await;
    let dairy = app.seed_activity("Dairy", Some(food.id), 2).await;
    let cheese = app.seed_activity("Cheese", Some(dairy.id), 3).await;
    let milk = app.seed_activity("Milk", Some(dairy.id), 3).await;

    let response = app.get(&format!("/api/v1/activities/{}", dairy.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;

    assert_eq!(data["name"], "Dairy");
    assert_eq!(data["parent"]["name"], "Food");
    let children = data["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    let child_names: Vec<&str> = children
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(child_names.contains(&"Cheese"));
    assert!(child_names.contains(&"Milk"));
}

#[tokio::test]
async fn unknown_activity_tree_returns_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/activities/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roots_endpoint_lists_only_parentless_activities() {
    let app = TestApp::new().await;
    let food = app.seed_activity("Food", None, 1).await;
    app.seed_activity("Dairy", Some(food.id), 2).await;
    app.seed_activity("Transport", None, 1).await;

    let response = app.get("/api/v1/activities/roots").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    let items = data.as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert!(item["parent_id"].is_null());
    }
}

#[tokio::test]
async fn listing_pages_activities() {
    let app = TestApp::new().await;
    for name in ["One", "Two", "Three"] {
        app.seed_activity(name, None, 1).await;
    }

    let response = app.get("/api/v1/activities?offset=0&limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_data(response).await;
    assert_eq!(data.as_array().unwrap().len(), 2);
}
