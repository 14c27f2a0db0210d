use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Repositórios e serviços só devolvem este tipo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Parâmetros mal formatados: {0}")]
    MalformedRequest(String),

    #[error("Chave de API inválida")]
    InvalidApiKey,

    #[error("Organização {0} não encontrada")]
    OrganizationNotFound(i32),

    #[error("Prédio {0} não encontrado")]
    BuildingNotFound(i32),

    #[error("Nenhuma organização para a atividade {0}")]
    NoOrganizationsForActivity(i32),

    #[error("Nenhum prédio na área informada")]
    NoBuildingsInArea,

    #[error("Profundidade inválida: {0}")]
    InvalidActivityDepth(u8),

    #[error("Termo de busca muito curto: '{0}'")]
    SearchTermTooShort(String),

    #[error("Área inválida: {0}")]
    InvalidArea(String),

    // Falha do repositório (conexão, timeout). Nunca é recuperada aqui.
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro já traduzido, pronto para virar resposta HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MalformedRequest(_)
            | AppError::InvalidActivityDepth(_)
            | AppError::SearchTermTooShort(_)
            | AppError::InvalidArea(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidApiKey => StatusCode::FORBIDDEN,
            AppError::OrganizationNotFound(_)
            | AppError::BuildingNotFound(_)
            | AppError::NoOrganizationsForActivity(_)
            | AppError::NoBuildingsInArea => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::MalformedRequest(_) => "malformed_request",
            AppError::InvalidApiKey => "invalid_api_key",
            AppError::OrganizationNotFound(_) => "organization_not_found",
            AppError::BuildingNotFound(_) => "building_not_found",
            AppError::NoOrganizationsForActivity(_) => "no_organizations_for_activity",
            AppError::NoBuildingsInArea => "no_buildings_in_area",
            AppError::InvalidActivityDepth(_) => "invalid_depth",
            AppError::SearchTermTooShort(_) => "search_term_too_short",
            AppError::InvalidArea(_) => "invalid_area",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal_error",
        }
    }

    /// Converte o erro de domínio no erro HTTP, já no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let error = store.translate(&locale.0, self.message_key());

        let details = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            let key = e.message.as_deref().unwrap_or(&e.code);
                            Value::String(store.translate(&locale.0, key))
                        })
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                Some(Value::Object(details))
            }
            AppError::MalformedRequest(reason) | AppError::InvalidArea(reason) => {
                Some(json!({ "reason": reason }))
            }
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            AppError::DatabaseError(e) => {
                tracing::error!("Erro de banco de dados: {:?}", e);
                None
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {:#}", e);
                None
            }
            _ => None,
        };

        ApiError { status, error, details }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}
