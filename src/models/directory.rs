// src/models/directory.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- 1. Prédios ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Building {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "г. Москва, ул. Ленина 1, офис 3")]
    pub address: String,

    #[schema(example = 55.7558, minimum = -90.0, maximum = 90.0)]
    pub latitude: f64,

    #[schema(example = 37.6173, minimum = -180.0, maximum = 180.0)]
    pub longitude: f64,
}

// --- 2. Atividades (árvore auto-referenciada por id) ---
// A raiz não tem parent_id. A posse é por índice, nunca por ponteiro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Activity {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
}

// Projeção mínima de uma atividade anexada a uma organização
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivityRef {
    #[schema(example = 2)]
    pub id: i32,

    #[schema(example = "Мясная продукция")]
    pub name: String,
}

impl From<&Activity> for ActivityRef {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name.clone(),
        }
    }
}

// --- 3. Organizações ---
// Sempre vem do repositório com o prédio e as atividades anexados.
// Serializa no formato "OrganizationWithBuilding" da API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = OrganizationWithBuilding)]
pub struct Organization {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "ООО 'Рога и Копыта'")]
    pub name: String,

    pub phone_numbers: Vec<String>,

    pub building: Building,

    pub activities: Vec<ActivityRef>,
}

// Organização sem o prédio (usada dentro de um prédio e na busca por atividade)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationSummary {
    pub id: i32,
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub activities: Vec<ActivityRef>,
}

impl From<Organization> for OrganizationSummary {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            phone_numbers: org.phone_numbers,
            activities: org.activities,
        }
    }
}

// --- 4. Prédio com as suas organizações ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BuildingWithOrganizations {
    pub id: i32,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub organizations: Vec<OrganizationSummary>,
}

impl BuildingWithOrganizations {
    pub fn new(building: Building, organizations: Vec<OrganizationSummary>) -> Self {
        Self {
            id: building.id,
            address: building.address,
            latitude: building.latitude,
            longitude: building.longitude,
            organizations,
        }
    }
}

// --- 5. Formato persistido de uma organização ---
// Espelha as tabelas 'organizations' + 'organization_activity'.
// Usado pelo seed e pelo repositório em memória.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRecord {
    pub id: i32,
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub building_id: i32,
    pub activity_ids: Vec<i32>,
}

// Conjunto completo de registros (seed / carga do repositório em memória)
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    pub buildings: Vec<Building>,
    pub activities: Vec<Activity>,
    pub organizations: Vec<OrganizationRecord>,
}
