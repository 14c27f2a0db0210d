// src/handlers/activities.rs

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
    handlers::params::{malformed, ActivitySearchQuery},
    middleware::i18n::Locale,
    models::directory::OrganizationSummary,
};

// GET /api/activities/{activity_id}/organizations/search
#[utoipa::path(
    get,
    path = "/api/activities/{activity_id}/organizations/search",
    tag = "Activities",
    params(
        ("activity_id" = i32, Path, description = "ID da atividade raiz"),
        ActivitySearchQuery
    ),
    responses(
        (status = 200, description = "Organizações da atividade e das suas descendentes", body = Vec<OrganizationSummary>),
        (status = 403, description = "Chave de API inválida"),
        (status = 404, description = "Nenhuma organização para a atividade"),
        (status = 422, description = "Profundidade fora de 1..=3")
    ),
    security(("api_key" = []))
)]
pub async fn search_organizations_by_activity(
    State(app_state): State<AppState>,
    locale: Locale,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<ActivitySearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Path(activity_id) = path
        .map_err(|e| malformed(e).to_api_error(&locale, &app_state.i18n_store))?;
    let Query(params) = query
        .map_err(|e| malformed(e).to_api_error(&locale, &app_state.i18n_store))?;

    params.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let organizations = app_state
        .activity_service
        .search_organizations(activity_id, params.depth())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Lista vazia aqui vira 404
    if organizations.is_empty() {
        tracing::warn!("Nenhuma organização para a atividade {}", activity_id);
        return Err(AppError::NoOrganizationsForActivity(activity_id).to_api_error(&locale, &app_state.i18n_store));
    }

    let body: Vec<OrganizationSummary> = organizations.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)))
}
