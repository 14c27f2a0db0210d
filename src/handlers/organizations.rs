// src/handlers/organizations.rs

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::params::{malformed, CircularAreaQuery, NameSearchQuery, RectangularAreaQuery},
    middleware::i18n::Locale,
    models::directory::{BuildingWithOrganizations, Organization},
};

// =============================================================================
//  1. BUSCA POR NOME
// =============================================================================

// GET /api/organizations/search?name=
#[utoipa::path(
    get,
    path = "/api/organizations/search",
    tag = "Organizations",
    params(NameSearchQuery),
    responses(
        (status = 200, description = "Organizações cujo nome contém o termo (pode ser vazio)", body = Vec<Organization>),
        (status = 403, description = "Chave de API inválida"),
        (status = 422, description = "Termo com menos de 2 caracteres")
    ),
    security(("api_key" = []))
)]
pub async fn search_organizations(
    State(app_state): State<AppState>,
    locale: Locale,
    query: Result<Query<NameSearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Query(params) = query
        .map_err(|e| malformed(e).to_api_error(&locale, &app_state.i18n_store))?;

    params.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    // Aqui lista vazia é resposta válida (200 com [])
    let organizations = app_state
        .organization_service
        .by_name_substring(&params.name)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(organizations)))
}

// =============================================================================
//  2. BUSCA POR ÁREA
// =============================================================================

// GET /api/organizations/nearby/circular
#[utoipa::path(
    get,
    path = "/api/organizations/nearby/circular",
    tag = "Organizations",
    params(CircularAreaQuery),
    responses(
        (status = 200, description = "Prédios dentro do círculo, com as suas organizações", body = Vec<BuildingWithOrganizations>),
        (status = 403, description = "Chave de API inválida"),
        (status = 404, description = "Nenhum prédio na área"),
        (status = 422, description = "Coordenadas ou raio inválidos")
    ),
    security(("api_key" = []))
)]
pub async fn fetch_buildings_in_circular_area(
    State(app_state): State<AppState>,
    locale: Locale,
    query: Result<Query<CircularAreaQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Query(params) = query
        .map_err(|e| malformed(e).to_api_error(&locale, &app_state.i18n_store))?;

    params.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let buildings = app_state
        .building_service
        .in_circular_area(params.area())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    if buildings.is_empty() {
        tracing::warn!(
            "Nenhum prédio num raio de {} km de ({}, {})",
            params.radius,
            params.latitude,
            params.longitude
        );
        return Err(AppError::NoBuildingsInArea.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok((StatusCode::OK, Json(buildings)))
}

// GET /api/organizations/nearby/rectangular
#[utoipa::path(
    get,
    path = "/api/organizations/nearby/rectangular",
    tag = "Organizations",
    params(RectangularAreaQuery),
    responses(
        (status = 200, description = "Prédios dentro do retângulo, com as suas organizações", body = Vec<BuildingWithOrganizations>),
        (status = 403, description = "Chave de API inválida"),
        (status = 404, description = "Nenhum prédio na área"),
        (status = 422, description = "Limites inválidos")
    ),
    security(("api_key" = []))
)]
pub async fn fetch_buildings_in_rectangular_area(
    State(app_state): State<AppState>,
    locale: Locale,
    query: Result<Query<RectangularAreaQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Query(params) = query
        .map_err(|e| malformed(e).to_api_error(&locale, &app_state.i18n_store))?;

    params.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    params.validate_order()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let buildings = app_state
        .building_service
        .in_rectangular_area(params.bounding_box())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    if buildings.is_empty() {
        tracing::warn!("Nenhum prédio no retângulo {:?}", params.bounding_box());
        return Err(AppError::NoBuildingsInArea.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok((StatusCode::OK, Json(buildings)))
}

// =============================================================================
//  3. BUSCA POR ID
// =============================================================================

// GET /api/organizations/{organization_id}
#[utoipa::path(
    get,
    path = "/api/organizations/{organization_id}",
    tag = "Organizations",
    params(
        ("organization_id" = i32, Path, description = "ID da organização")
    ),
    responses(
        (status = 200, description = "Organização com o seu prédio", body = Organization),
        (status = 403, description = "Chave de API inválida"),
        (status = 404, description = "Organização não encontrada")
    ),
    security(("api_key" = []))
)]
pub async fn get_organization(
    State(app_state): State<AppState>,
    locale: Locale,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Path(organization_id) = path
        .map_err(|e| malformed(e).to_api_error(&locale, &app_state.i18n_store))?;

    let organization = app_state
        .organization_service
        .by_id(organization_id)
        .await
        .map_err(|app_err| {
            if matches!(app_err, AppError::OrganizationNotFound(_)) {
                tracing::warn!("Organização {} não encontrada", organization_id);
            }
            app_err.to_api_error(&locale, &app_state.i18n_store)
        })?;

    Ok((StatusCode::OK, Json(organization)))
}
