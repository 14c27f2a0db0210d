use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// O nome do cabeçalho com a chave estática
pub const API_KEY_HEADER: &str = "x-api-key";

// O middleware em si: barra tudo que não trouxer a chave certa.
// Os serviços não sabem nada de autenticação.
pub async fn api_key_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match provided {
        Some(key) if key == *app_state.api_key => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Requisição com chave de API inválida: {}", request.uri());
            Err(AppError::InvalidApiKey.to_api_error(&locale, &app_state.i18n_store))
        }
        None => {
            tracing::warn!("Requisição sem o cabeçalho X-API-Key: {}", request.uri());
            Err(AppError::InvalidApiKey.to_api_error(&locale, &app_state.i18n_store))
        }
    }
}
