// src/services/building_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::DirectoryRepository,
    models::directory::BuildingWithOrganizations,
    services::geo_filter::{in_circle, in_rectangle, BoundingBox, CircularArea, GeoPoint},
};

// Busca de prédios por área.
// Sem índice geoespacial: carrega todos os prédios e filtra em memória
// (varredura linear, aceitável para o volume do diretório).
#[derive(Clone)]
pub struct BuildingService {
    repo: Arc<dyn DirectoryRepository>,
}

impl BuildingService {
    pub fn new(repo: Arc<dyn DirectoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn by_id(&self, id: i32) -> Result<BuildingWithOrganizations, AppError> {
        self.repo
            .get_building_by_id(id)
            .await?
            .ok_or(AppError::BuildingNotFound(id))
    }

    pub async fn in_circular_area(&self, area: CircularArea) -> Result<Vec<BuildingWithOrganizations>, AppError> {
        let center = area.center;
        if !(center.latitude.is_finite() && center.longitude.is_finite()) {
            return Err(AppError::InvalidArea("centro com coordenadas não finitas".into()));
        }
        if !area.radius_km.is_finite() || area.radius_km < 0.0 {
            return Err(AppError::InvalidArea(format!("raio inválido: {}", area.radius_km)));
        }

        self.filter_all(|point| in_circle(center, area.radius_km, point)).await
    }

    // A ordem min/max é responsabilidade de quem chama; aqui o predicado é aplicado como veio.
    pub async fn in_rectangular_area(&self, bbox: BoundingBox) -> Result<Vec<BuildingWithOrganizations>, AppError> {
        let bounds = [bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(AppError::InvalidArea("limites com valores não finitos".into()));
        }

        self.filter_all(|point| {
            in_rectangle(bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon, point)
        })
        .await
    }

    async fn filter_all<F>(&self, keep: F) -> Result<Vec<BuildingWithOrganizations>, AppError>
    where
        F: Fn(GeoPoint) -> bool,
    {
        let candidates = self.repo.get_all_buildings().await?;
        let total = candidates.len();

        let matched: Vec<_> = candidates
            .into_iter()
            .filter(|b| keep(GeoPoint::new(b.latitude, b.longitude)))
            .collect();

        tracing::debug!("Filtro de área: {} de {} prédios", matched.len(), total);
        Ok(matched)
    }
}
