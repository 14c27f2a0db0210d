// src/db/directory_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::{
    common::error::AppError,
    models::directory::{
        Activity, ActivityRef, Building, BuildingWithOrganizations, DirectorySnapshot,
        Organization, OrganizationSummary,
    },
};

/// Contrato de leitura do diretório. Os serviços só conhecem este trait.
///
/// Toda organização devolvida vem com o prédio e as atividades anexados,
/// uma única vez por id (sem duplicatas vindas de JOIN).
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn get_activity_by_id(&self, id: i32) -> Result<Option<Activity>, AppError>;

    async fn get_child_activities(&self, parent_id: i32) -> Result<Vec<Activity>, AppError>;

    async fn get_organizations_by_activity_ids(
        &self,
        activity_ids: &[i32],
    ) -> Result<Vec<Organization>, AppError>;

    /// Busca por substring do nome, sem diferenciar maiúsculas.
    async fn get_organizations_by_name_like(&self, fragment: &str) -> Result<Vec<Organization>, AppError>;

    async fn get_organization_by_id(&self, id: i32) -> Result<Option<Organization>, AppError>;

    async fn get_all_buildings(&self) -> Result<Vec<BuildingWithOrganizations>, AppError>;

    async fn get_building_by_id(&self, id: i32) -> Result<Option<BuildingWithOrganizations>, AppError>;
}

// ---
// Linhas cruas do Postgres
// ---

#[derive(Debug, FromRow)]
struct OrganizationRow {
    id: i32,
    name: String,
    phone_numbers: Vec<String>,
    building_id: i32,
    address: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, FromRow)]
struct OrganizationActivityRow {
    organization_id: i32,
    id: i32,
    name: String,
}

const ORGANIZATION_SELECT: &str = r#"
    SELECT o.id, o.name, o.phone_numbers, o.building_id,
           b.address, b.latitude, b.longitude
    FROM organizations o
    JOIN buildings b ON b.id = o.building_id
"#;

/// Escapa os curingas do LIKE para que o termo seja tratado como texto literal.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

// O repositório do Postgres, responsável pelas tabelas do diretório
#[derive(Clone)]
pub struct PgDirectoryRepository {
    pool: PgPool,
}

impl PgDirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Carrega as atividades de várias organizações numa única consulta
    async fn load_activities(
        &self,
        organization_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<ActivityRef>>, AppError> {
        let mut by_org: HashMap<i32, Vec<ActivityRef>> = HashMap::new();
        if organization_ids.is_empty() {
            return Ok(by_org);
        }

        let rows = sqlx::query_as::<_, OrganizationActivityRow>(
            r#"
            SELECT oa.organization_id, a.id, a.name
            FROM organization_activity oa
            JOIN activities a ON a.id = oa.activity_id
            WHERE oa.organization_id = ANY($1)
            ORDER BY oa.organization_id, a.id
            "#,
        )
        .bind(organization_ids)
        .fetch_all(&self.pool)
        .await?;

        for row in rows {
            by_org
                .entry(row.organization_id)
                .or_default()
                .push(ActivityRef { id: row.id, name: row.name });
        }
        Ok(by_org)
    }

    // Monta as entidades a partir das linhas (prédio via JOIN + atividades)
    async fn assemble(&self, rows: Vec<OrganizationRow>) -> Result<Vec<Organization>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut activities = self.load_activities(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| Organization {
                activities: activities.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                phone_numbers: row.phone_numbers,
                building: Building {
                    id: row.building_id,
                    address: row.address,
                    latitude: row.latitude,
                    longitude: row.longitude,
                },
            })
            .collect())
    }

    async fn attach_organizations(
        &self,
        buildings: Vec<Building>,
    ) -> Result<Vec<BuildingWithOrganizations>, AppError> {
        let building_ids: Vec<i32> = buildings.iter().map(|b| b.id).collect();

        let rows = sqlx::query_as::<_, OrganizationRow>(&format!(
            "{ORGANIZATION_SELECT} WHERE o.building_id = ANY($1) ORDER BY o.id"
        ))
        .bind(&building_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_building: HashMap<i32, Vec<OrganizationSummary>> = HashMap::new();
        for org in self.assemble(rows).await? {
            by_building.entry(org.building.id).or_default().push(org.into());
        }

        Ok(buildings
            .into_iter()
            .map(|b| {
                let orgs = by_building.remove(&b.id).unwrap_or_default();
                BuildingWithOrganizations::new(b, orgs)
            })
            .collect())
    }

    /// Verifica se já existe algum prédio cadastrado.
    pub async fn is_empty(&self) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM buildings)")
            .fetch_one(&self.pool)
            .await?;
        Ok(!exists)
    }

    /// Grava um conjunto completo de registros numa única transação.
    pub async fn insert_snapshot(&self, snapshot: &DirectorySnapshot) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for b in &snapshot.buildings {
            sqlx::query("INSERT INTO buildings (id, address, latitude, longitude) VALUES ($1, $2, $3, $4)")
                .bind(b.id)
                .bind(&b.address)
                .bind(b.latitude)
                .bind(b.longitude)
                .execute(&mut *tx)
                .await?;
        }

        // Os pais vêm antes dos filhos no snapshot, a FK não reclama.
        for a in &snapshot.activities {
            sqlx::query("INSERT INTO activities (id, name, parent_id) VALUES ($1, $2, $3)")
                .bind(a.id)
                .bind(&a.name)
                .bind(a.parent_id)
                .execute(&mut *tx)
                .await?;
        }

        for o in &snapshot.organizations {
            sqlx::query(
                "INSERT INTO organizations (id, name, phone_numbers, building_id) VALUES ($1, $2, $3, $4)",
            )
            .bind(o.id)
            .bind(&o.name)
            .bind(&o.phone_numbers)
            .bind(o.building_id)
            .execute(&mut *tx)
            .await?;

            for activity_id in &o.activity_ids {
                sqlx::query("INSERT INTO organization_activity (organization_id, activity_id) VALUES ($1, $2)")
                    .bind(o.id)
                    .bind(activity_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        // Ids explícitos não avançam as sequences; acerta para os próximos INSERTs.
        for table in ["buildings", "activities", "organizations"] {
            sqlx::query(&format!(
                "SELECT setval(pg_get_serial_sequence('{table}', 'id'), COALESCE(MAX(id), 1)) FROM {table}"
            ))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl DirectoryRepository for PgDirectoryRepository {
    async fn get_activity_by_id(&self, id: i32) -> Result<Option<Activity>, AppError> {
        let activity = sqlx::query_as::<_, Activity>("SELECT id, name, parent_id FROM activities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(activity)
    }

    async fn get_child_activities(&self, parent_id: i32) -> Result<Vec<Activity>, AppError> {
        let children = sqlx::query_as::<_, Activity>(
            "SELECT id, name, parent_id FROM activities WHERE parent_id = $1 ORDER BY id",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(children)
    }

    async fn get_organizations_by_activity_ids(
        &self,
        activity_ids: &[i32],
    ) -> Result<Vec<Organization>, AppError> {
        if activity_ids.is_empty() {
            return Ok(Vec::new());
        }

        // IN (subconsulta) em vez de JOIN: cada organização aparece uma vez só
        let rows = sqlx::query_as::<_, OrganizationRow>(&format!(
            r#"{ORGANIZATION_SELECT}
            WHERE o.id IN (
                SELECT organization_id FROM organization_activity WHERE activity_id = ANY($1)
            )
            ORDER BY o.id"#
        ))
        .bind(activity_ids)
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn get_organizations_by_name_like(&self, fragment: &str) -> Result<Vec<Organization>, AppError> {
        let rows = sqlx::query_as::<_, OrganizationRow>(&format!(
            r#"{ORGANIZATION_SELECT} WHERE o.name ILIKE $1 ESCAPE '\' ORDER BY o.id"#
        ))
        .bind(like_pattern(fragment))
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn get_organization_by_id(&self, id: i32) -> Result<Option<Organization>, AppError> {
        let row = sqlx::query_as::<_, OrganizationRow>(&format!("{ORGANIZATION_SELECT} WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn get_all_buildings(&self) -> Result<Vec<BuildingWithOrganizations>, AppError> {
        let buildings = sqlx::query_as::<_, Building>(
            "SELECT id, address, latitude, longitude FROM buildings ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        self.attach_organizations(buildings).await
    }

    async fn get_building_by_id(&self, id: i32) -> Result<Option<BuildingWithOrganizations>, AppError> {
        let building = sqlx::query_as::<_, Building>(
            "SELECT id, address, latitude, longitude FROM buildings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match building {
            Some(b) => Ok(self.attach_organizations(vec![b]).await?.into_iter().next()),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_wraps_fragment() {
        assert_eq!(like_pattern("Test"), "%Test%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
