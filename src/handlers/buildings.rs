// src/handlers/buildings.rs

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::params::{malformed, positive_id},
    middleware::i18n::Locale,
    models::directory::BuildingWithOrganizations,
};

// GET /api/buildings/{building_id}/organizations
#[utoipa::path(
    get,
    path = "/api/buildings/{building_id}/organizations",
    tag = "Buildings",
    params(
        ("building_id" = i32, Path, description = "ID do prédio (maior que zero)")
    ),
    responses(
        (status = 200, description = "Prédio com as suas organizações", body = BuildingWithOrganizations),
        (status = 403, description = "Chave de API inválida"),
        (status = 404, description = "Prédio não encontrado"),
        (status = 422, description = "ID inválido")
    ),
    security(("api_key" = []))
)]
pub async fn list_organizations_in_building(
    State(app_state): State<AppState>,
    locale: Locale,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Path(raw_id) = path
        .map_err(|e| malformed(e).to_api_error(&locale, &app_state.i18n_store))?;
    let building_id = positive_id("building_id", raw_id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let building = app_state
        .building_service
        .by_id(building_id)
        .await
        .map_err(|app_err| {
            if matches!(app_err, AppError::BuildingNotFound(_)) {
                tracing::warn!("Prédio {} não encontrado", building_id);
            }
            app_err.to_api_error(&locale, &app_state.i18n_store)
        })?;

    Ok((StatusCode::OK, Json(building)))
}
