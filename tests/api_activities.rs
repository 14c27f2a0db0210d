// tests/api_activities.rs

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{activity, app, food_tree_repo, get, organization};

#[tokio::test]
async fn food_finds_meat_and_dairy_shops() {
    let (status, body) = get(app(food_tree_repo()), "/api/activities/1/organizations/search?depth=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "id": 1,
                "name": "Meat Shop",
                "phone_numbers": ["123-456"],
                "activities": [{ "id": 2, "name": "Meat Products" }]
            },
            {
                "id": 2,
                "name": "Dairy Store",
                "phone_numbers": ["789-012"],
                "activities": [{ "id": 3, "name": "Dairy Products" }]
            }
        ])
    );
}

#[tokio::test]
async fn depth_defaults_to_three() {
    let (status, body) = get(app(food_tree_repo()), "/api/activities/1/organizations/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn depth_one_only_looks_at_the_root() {
    let (status, body) = get(app(food_tree_repo()), "/api/activities/1/organizations/search?depth=1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No organizations found for the given activity" }));
}

#[tokio::test]
async fn depth_limits_how_far_down_the_tree_goes() {
    // Food -> Meat -> Beef -> Wagyu, uma organização só no último nível
    let repo = food_tree_repo()
        .with_activity(activity(4, "Beef", Some(2)))
        .with_activity(activity(5, "Wagyu", Some(4)))
        .with_organization(organization(3, "Wagyu House", &["000-000"], 1, &[5]));

    let (_, body) = get(app(repo.clone()), "/api/activities/1/organizations/search?depth=3").await;
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|o| o["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2]);

    let (_, body) = get(app(repo), "/api/activities/2/organizations/search?depth=3").await;
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|o| o["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn unknown_activity_is_404() {
    let (status, body) = get(app(food_tree_repo()), "/api/activities/999/organizations/search?depth=3").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No organizations found for the given activity" }));
}

#[tokio::test]
async fn depth_zero_is_422() {
    let (status, body) = get(app(food_tree_repo()), "/api/activities/1/organizations/search?depth=0").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["depth"].is_array());
}

#[tokio::test]
async fn depth_four_is_422() {
    let (status, _) = get(app(food_tree_repo()), "/api/activities/1/organizations/search?depth=4").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
