// src/routes.rs

use axum::{
    middleware as axum_middleware,
    response::Redirect,
    routing::get,
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::api_key_guard};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const DOCS_PATH: &str = "/docs";

pub fn build_router(app_state: AppState) -> Router {
    let building_routes = Router::new()
        .route(
            "/{building_id}/organizations",
            get(handlers::buildings::list_organizations_in_building),
        );

    // "/search" e "/nearby/*" são literais e têm prioridade sobre "/{organization_id}"
    let organization_routes = Router::new()
        .route("/search", get(handlers::organizations::search_organizations))
        .route(
            "/nearby/circular",
            get(handlers::organizations::fetch_buildings_in_circular_area),
        )
        .route(
            "/nearby/rectangular",
            get(handlers::organizations::fetch_buildings_in_rectangular_area),
        )
        .route("/{organization_id}", get(handlers::organizations::get_organization));

    let activity_routes = Router::new()
        .route(
            "/{activity_id}/organizations/search",
            get(handlers::activities::search_organizations_by_activity),
        );

    // Tudo abaixo de /api exige a chave, menos o health check
    let protected = Router::new()
        .nest("/buildings", building_routes)
        .nest("/organizations", organization_routes)
        .nest("/activities", activity_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            api_key_guard,
        ));

    Router::new()
        .route("/", get(|| async { Redirect::temporary(DOCS_PATH) }))
        .route("/api/health", get(|| async { "OK" }))
        // Swagger UI em /docs, servindo também o JSON em OPENAPI_PATH
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .nest("/api", protected)
        .with_state(app_state)
}
