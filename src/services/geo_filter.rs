// src/services/geo_filter.rs

//! Filtros geográficos puros: distância de haversine, círculo e retângulo.
//! Nenhum acesso a banco aqui.

/// Raio médio da Terra, em quilômetros.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Distância de grande círculo (haversine) entre dois pontos, em km.
/// Entradas em graus.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Arredondamento pode empurrar `a` um pouco acima de 1 perto dos antípodas
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    c * EARTH_RADIUS_KM
}

pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    distance_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

// Área circular. A borda é inclusiva.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArea {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl CircularArea {
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        haversine_km(self.center, point) <= self.radius_km
    }
}

// Retângulo em lat/lon. Bordas inclusivas, sem tratar o antimeridiano.
// Um intervalo invertido simplesmente não contém nada.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }
}

pub fn in_circle(center: GeoPoint, radius_km: f64, point: GeoPoint) -> bool {
    CircularArea::new(center, radius_km).contains(point)
}

pub fn in_rectangle(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64, point: GeoPoint) -> bool {
    BoundingBox::new(min_lat, max_lat, min_lon, max_lon).contains(point)
}
