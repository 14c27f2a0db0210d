// src/db/memory_repo.rs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::DirectoryRepository,
    models::directory::{
        Activity, ActivityRef, Building, BuildingWithOrganizations, DirectorySnapshot,
        Organization, OrganizationRecord,
    },
};

/// Repositório em memória, somente leitura depois de montado.
///
/// A árvore de atividades fica numa lista de adjacência explícita
/// (id -> ids dos filhos), sem ponteiros entre nós.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectoryRepository {
    buildings: BTreeMap<i32, Building>,
    activities: BTreeMap<i32, Activity>,
    children: HashMap<i32, Vec<i32>>,
    organizations: BTreeMap<i32, OrganizationRecord>,
}

impl InMemoryDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: DirectorySnapshot) -> Self {
        let mut repo = Self::new();
        for b in snapshot.buildings {
            repo = repo.with_building(b);
        }
        for a in snapshot.activities {
            repo = repo.with_activity(a);
        }
        for o in snapshot.organizations {
            repo = repo.with_organization(o);
        }
        repo
    }

    pub fn with_building(mut self, building: Building) -> Self {
        self.buildings.insert(building.id, building);
        self
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        if let Some(parent_id) = activity.parent_id {
            let siblings = self.children.entry(parent_id).or_default();
            if !siblings.contains(&activity.id) {
                siblings.push(activity.id);
                siblings.sort_unstable();
            }
        }
        self.activities.insert(activity.id, activity);
        self
    }

    pub fn with_organization(mut self, organization: OrganizationRecord) -> Self {
        self.organizations.insert(organization.id, organization);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.activities.is_empty() && self.organizations.is_empty()
    }

    // Anexa o prédio e as atividades ao registro. Organização com prédio
    // inexistente é ignorada, como faria o INNER JOIN do Postgres.
    fn hydrate(&self, record: &OrganizationRecord) -> Option<Organization> {
        let building = self.buildings.get(&record.building_id)?.clone();

        let mut activity_ids = record.activity_ids.clone();
        activity_ids.sort_unstable();
        activity_ids.dedup();

        let activities = activity_ids
            .iter()
            .filter_map(|id| self.activities.get(id))
            .map(ActivityRef::from)
            .collect();

        Some(Organization {
            id: record.id,
            name: record.name.clone(),
            phone_numbers: record.phone_numbers.clone(),
            building,
            activities,
        })
    }

    fn building_with_organizations(&self, building: &Building) -> BuildingWithOrganizations {
        let organizations = self
            .organizations
            .values()
            .filter(|o| o.building_id == building.id)
            .filter_map(|o| self.hydrate(o))
            .map(Into::into)
            .collect();

        BuildingWithOrganizations::new(building.clone(), organizations)
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn get_activity_by_id(&self, id: i32) -> Result<Option<Activity>, AppError> {
        Ok(self.activities.get(&id).cloned())
    }

    async fn get_child_activities(&self, parent_id: i32) -> Result<Vec<Activity>, AppError> {
        Ok(self
            .children
            .get(&parent_id)
            .map(|ids| ids.iter().filter_map(|id| self.activities.get(id)).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_organizations_by_activity_ids(
        &self,
        activity_ids: &[i32],
    ) -> Result<Vec<Organization>, AppError> {
        Ok(self
            .organizations
            .values()
            .filter(|o| o.activity_ids.iter().any(|id| activity_ids.contains(id)))
            .filter_map(|o| self.hydrate(o))
            .collect())
    }

    async fn get_organizations_by_name_like(&self, fragment: &str) -> Result<Vec<Organization>, AppError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .organizations
            .values()
            .filter(|o| o.name.to_lowercase().contains(&needle))
            .filter_map(|o| self.hydrate(o))
            .collect())
    }

    async fn get_organization_by_id(&self, id: i32) -> Result<Option<Organization>, AppError> {
        Ok(self.organizations.get(&id).and_then(|o| self.hydrate(o)))
    }

    async fn get_all_buildings(&self) -> Result<Vec<BuildingWithOrganizations>, AppError> {
        Ok(self
            .buildings
            .values()
            .map(|b| self.building_with_organizations(b))
            .collect())
    }

    async fn get_building_by_id(&self, id: i32) -> Result<Option<BuildingWithOrganizations>, AppError> {
        Ok(self.buildings.get(&id).map(|b| self.building_with_organizations(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(id: i32, name: &str, parent_id: Option<i32>) -> Activity {
        Activity { id, name: name.to_string(), parent_id }
    }

    fn repo() -> InMemoryDirectoryRepository {
        InMemoryDirectoryRepository::new()
            .with_building(Building {
                id: 1,
                address: "Test Address".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            })
            .with_activity(activity(1, "Food", None))
            .with_activity(activity(3, "Dairy Products", Some(1)))
            .with_activity(activity(2, "Meat Products", Some(1)))
            .with_organization(OrganizationRecord {
                id: 1,
                name: "Meat Shop".to_string(),
                phone_numbers: vec!["123-456".to_string()],
                building_id: 1,
                activity_ids: vec![2, 1, 2],
            })
    }

    #[test]
    fn emptiness_tracks_every_table() {
        assert!(InMemoryDirectoryRepository::new().is_empty());
        assert!(!repo().is_empty());
        assert!(!InMemoryDirectoryRepository::new().with_activity(activity(1, "Food", None)).is_empty());
    }

    #[tokio::test]
    async fn children_come_back_ordered_by_id() {
        let ids: Vec<i32> = repo()
            .get_child_activities(1)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn organization_matched_by_two_activities_appears_once() {
        let orgs = repo().get_organizations_by_activity_ids(&[1, 2]).await.unwrap();
        assert_eq!(orgs.len(), 1);
        assert_eq!(
            orgs[0].activities.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn building_lists_its_organizations() {
        let building = repo().get_building_by_id(1).await.unwrap().unwrap();
        assert_eq!(building.organizations.len(), 1);
        assert_eq!(building.organizations[0].name, "Meat Shop");
    }

    #[tokio::test]
    async fn name_search_ignores_case() {
        let lower = repo().get_organizations_by_name_like("meat").await.unwrap();
        let upper = repo().get_organizations_by_name_like("MEAT").await.unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 1);
    }
}
