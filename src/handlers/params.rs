// src/handlers/params.rs

use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    services::{
        activity_service::DEFAULT_DEPTH,
        geo_filter::{BoundingBox, CircularArea, GeoPoint},
    },
};

// Rejeições do axum (Path/Query mal formatados) viram 422, como os demais erros de entrada
pub fn malformed(rejection: impl std::fmt::Display) -> AppError {
    AppError::MalformedRequest(rejection.to_string())
}

// Ids de path precisam ser positivos
pub fn positive_id(field: &'static str, id: i32) -> Result<i32, AppError> {
    if id > 0 {
        return Ok(id);
    }
    let mut err = ValidationError::new("range");
    err.message = Some("id_positive".into());
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    Err(AppError::ValidationError(errors))
}

fn default_depth() -> i32 {
    DEFAULT_DEPTH as i32
}

// ---
// Query: busca por atividade
// ---
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivitySearchQuery {
    /// Profundidade máxima da árvore de atividades
    #[serde(default = "default_depth")]
    #[validate(range(min = 1, max = 3, message = "depth_range"))]
    #[param(minimum = 1, maximum = 3, default = 3)]
    pub depth: i32,
}

impl ActivitySearchQuery {
    // Só chamar depois de `validate()`: 1..=3 cabe num u8
    pub fn depth(&self) -> u8 {
        self.depth as u8
    }
}

// ---
// Query: busca por nome
// ---
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameSearchQuery {
    /// Parte do nome da organização (mínimo 2 caracteres)
    #[validate(length(min = 2, message = "name_min_length"))]
    #[param(min_length = 2, example = "Test")]
    pub name: String,
}

// ---
// Query: área circular
// ---
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CircularAreaQuery {
    /// Latitude do centro, em graus
    #[validate(range(min = -90.0, max = 90.0, message = "latitude_range"))]
    #[param(minimum = -90.0, maximum = 90.0, example = 55.7558)]
    pub latitude: f64,

    /// Longitude do centro, em graus
    #[validate(range(min = -180.0, max = 180.0, message = "longitude_range"))]
    #[param(minimum = -180.0, maximum = 180.0, example = 37.6176)]
    pub longitude: f64,

    /// Raio em quilômetros
    #[validate(range(exclusive_min = 0.0, message = "radius_positive"))]
    #[param(exclusive_minimum = 0.0, example = 1.0)]
    pub radius: f64,
}

impl CircularAreaQuery {
    pub fn area(&self) -> CircularArea {
        CircularArea::new(GeoPoint::new(self.latitude, self.longitude), self.radius)
    }
}

// ---
// Query: área retangular
// ---
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RectangularAreaQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude_range"))]
    #[param(minimum = -90.0, maximum = 90.0, example = 55.75)]
    pub min_lat: f64,

    #[validate(range(min = -90.0, max = 90.0, message = "latitude_range"))]
    #[param(minimum = -90.0, maximum = 90.0, example = 55.77)]
    pub max_lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "longitude_range"))]
    #[param(minimum = -180.0, maximum = 180.0, example = 37.61)]
    pub min_lon: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "longitude_range"))]
    #[param(minimum = -180.0, maximum = 180.0, example = 37.63)]
    pub max_lon: f64,
}

impl RectangularAreaQuery {
    // Validação de consistência: o validator não compara campos entre si.
    pub fn validate_order(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.min_lat > self.max_lat {
            let mut err = ValidationError::new("order");
            err.message = Some("latitude_order".into());
            errors.add("min_lat", err);
        }
        if self.min_lon > self.max_lon {
            let mut err = ValidationError::new("order");
            err.message = Some("longitude_order".into());
            errors.add("min_lon", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.min_lat, self.max_lat, self.min_lon, self.max_lon)
    }
}
