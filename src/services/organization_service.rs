// src/services/organization_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::DirectoryRepository,
    models::directory::Organization,
};

pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Clone)]
pub struct OrganizationService {
    repo: Arc<dyn DirectoryRepository>,
}

impl OrganizationService {
    pub fn new(repo: Arc<dyn DirectoryRepository>) -> Self {
        Self { repo }
    }

    /// Organizações com pelo menos uma atividade dentro de `activity_ids`.
    pub async fn by_activity_set(&self, activity_ids: &[i32]) -> Result<Vec<Organization>, AppError> {
        // Conjunto vazio: nem vai ao banco
        if activity_ids.is_empty() {
            return Ok(Vec::new());
        }
        let orgs = self.repo.get_organizations_by_activity_ids(activity_ids).await?;
        Ok(dedup_by_id(orgs))
    }

    /// O termo vai como veio: espaços nas pontas fazem parte da substring.
    pub async fn by_name_substring(&self, query: &str) -> Result<Vec<Organization>, AppError> {
        if query.chars().count() < MIN_SEARCH_LEN {
            return Err(AppError::SearchTermTooShort(query.to_string()));
        }
        let orgs = self.repo.get_organizations_by_name_like(query).await?;
        tracing::debug!("Busca por nome '{}': {} organizações", query, orgs.len());
        Ok(dedup_by_id(orgs))
    }

    pub async fn by_id(&self, id: i32) -> Result<Organization, AppError> {
        self.repo
            .get_organization_by_id(id)
            .await?
            .ok_or(AppError::OrganizationNotFound(id))
    }
}

// Mantém a primeira ocorrência de cada id, preservando a ordem
fn dedup_by_id(orgs: Vec<Organization>) -> Vec<Organization> {
    let mut seen = std::collections::HashSet::new();
    orgs.into_iter().filter(|o| seen.insert(o.id)).collect()
}
