// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use org_directory::{
    config::AppState,
    db::{DirectoryRepository, InMemoryDirectoryRepository},
    models::directory::{Activity, Building, OrganizationRecord},
    routes::build_router,
};

pub const TEST_API_KEY: &str = "static_api_key";

pub fn app(repo: impl DirectoryRepository + 'static) -> Router {
    let repo: Arc<dyn DirectoryRepository> = Arc::new(repo);
    build_router(AppState::with_repository(repo, TEST_API_KEY))
}

pub fn building(id: i32, address: &str, latitude: f64, longitude: f64) -> Building {
    Building { id, address: address.to_string(), latitude, longitude }
}

pub fn activity(id: i32, name: &str, parent_id: Option<i32>) -> Activity {
    Activity { id, name: name.to_string(), parent_id }
}

pub fn organization(
    id: i32,
    name: &str,
    phones: &[&str],
    building_id: i32,
    activity_ids: &[i32],
) -> OrganizationRecord {
    OrganizationRecord {
        id,
        name: name.to_string(),
        phone_numbers: phones.iter().map(|p| p.to_string()).collect(),
        building_id,
        activity_ids: activity_ids.to_vec(),
    }
}

// Um prédio na origem com "Test Organization"
pub fn single_organization_repo() -> InMemoryDirectoryRepository {
    InMemoryDirectoryRepository::new()
        .with_building(building(1, "Test Address", 0.0, 0.0))
        .with_organization(organization(1, "Test Organization", &["123-456"], 1, &[]))
}

// Food -> {Meat Products, Dairy Products}, uma organização em cada folha
pub fn food_tree_repo() -> InMemoryDirectoryRepository {
    InMemoryDirectoryRepository::new()
        .with_building(building(1, "Test Address", 0.0, 0.0))
        .with_activity(activity(1, "Food", None))
        .with_activity(activity(2, "Meat Products", Some(1)))
        .with_activity(activity(3, "Dairy Products", Some(1)))
        .with_organization(organization(1, "Meat Shop", &["123-456"], 1, &[2]))
        .with_organization(organization(2, "Dairy Store", &["789-012"], 1, &[3]))
}

// Dois prédios a ~500 m um do outro, no centro de Moscou
pub fn moscow_repo() -> InMemoryDirectoryRepository {
    InMemoryDirectoryRepository::new()
        .with_building(building(1, "Building 1", 55.7558, 37.6176))
        .with_building(building(2, "Building 2", 55.7600, 37.6200))
        .with_organization(organization(1, "Org 1", &["111-111"], 1, &[]))
        .with_organization(organization(2, "Org 2", &["222-222"], 2, &[]))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).header("x-api-key", TEST_API_KEY)).await
}

pub async fn send(app: Router, builder: axum::http::request::Builder) -> (StatusCode, Value) {
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
