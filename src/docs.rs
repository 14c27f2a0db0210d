// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use crate::handlers;
use crate::middleware::auth::API_KEY_HEADER;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Buildings ---
        handlers::buildings::list_organizations_in_building,

        // --- Organizations ---
        handlers::organizations::search_organizations,
        handlers::organizations::fetch_buildings_in_circular_area,
        handlers::organizations::fetch_buildings_in_rectangular_area,
        handlers::organizations::get_organization,

        // --- Activities ---
        handlers::activities::search_organizations_by_activity,
    ),
    components(
        schemas(
            models::directory::Building,
            models::directory::ActivityRef,
            models::directory::Organization,
            models::directory::OrganizationSummary,
            models::directory::BuildingWithOrganizations,
        )
    ),
    tags(
        (name = "Buildings", description = "Prédios e as organizações neles instaladas"),
        (name = "Organizations", description = "Busca de organizações por nome, área e ID"),
        (name = "Activities", description = "Busca pela árvore de atividades")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}
