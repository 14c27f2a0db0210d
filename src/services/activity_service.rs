// src/services/activity_service.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::DirectoryRepository,
    models::directory::Organization,
    services::organization_service::OrganizationService,
};

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 3;
pub const DEFAULT_DEPTH: u8 = 3;

// Resolve uma atividade na própria atividade + descendentes, nível a nível.
#[derive(Clone)]
pub struct ActivityService {
    repo: Arc<dyn DirectoryRepository>,
    organizations: OrganizationService,
}

impl ActivityService {
    pub fn new(repo: Arc<dyn DirectoryRepository>) -> Self {
        let organizations = OrganizationService::new(repo.clone());
        Self { repo, organizations }
    }

    /// Organizações marcadas com a atividade ou com qualquer descendente dela
    /// até `depth` níveis. Lista vazia não é erro aqui.
    pub async fn search_organizations(&self, activity_id: i32, depth: u8) -> Result<Vec<Organization>, AppError> {
        let ids = self.expand_activity_ids(activity_id, depth).await?;
        let ids: Vec<i32> = ids.into_iter().collect();
        self.organizations.by_activity_set(&ids).await
    }

    /// Expande `root_id` em largura, por gerações inteiras.
    ///
    /// `depth` conta níveis incluindo a raiz: 1 = só a raiz, 2 = raiz + filhos,
    /// 3 = raiz + filhos + netos. A raiz sempre faz parte do resultado, mesmo
    /// que não exista (a busca seguinte apenas não encontra nada).
    pub async fn expand_activity_ids(&self, root_id: i32, depth: u8) -> Result<BTreeSet<i32>, AppError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(AppError::InvalidActivityDepth(depth));
        }

        if self.repo.get_activity_by_id(root_id).await?.is_none() {
            tracing::debug!("Atividade {} não existe, a busca seguirá só com o id", root_id);
        }

        let mut collected = BTreeSet::from([root_id]);
        let mut frontier = vec![root_id];

        for _ in 1..depth {
            let mut next = Vec::new();
            for parent_id in &frontier {
                for child in self.repo.get_child_activities(*parent_id).await? {
                    // Um id já visto nunca é expandido de novo (protege contra ciclos)
                    if collected.insert(child.id) {
                        next.push(child.id);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        tracing::debug!(
            "Atividade {} expandida em {} ids (profundidade {})",
            root_id,
            collected.len(),
            depth
        );
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryDirectoryRepository;
    use crate::models::directory::{Activity, Building, OrganizationRecord};

    fn activity(id: i32, parent_id: Option<i32>) -> Activity {
        Activity { id, name: format!("A{id}"), parent_id }
    }

    // 1 -> {2, 3}, 2 -> {4}, 4 -> {5}
    fn service() -> ActivityService {
        let repo = InMemoryDirectoryRepository::new()
            .with_activity(activity(1, None))
            .with_activity(activity(2, Some(1)))
            .with_activity(activity(3, Some(1)))
            .with_activity(activity(4, Some(2)))
            .with_activity(activity(5, Some(4)))
            .with_activity(activity(10, None));
        ActivityService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn depth_one_is_only_the_root() {
        let ids = service().expand_activity_ids(1, 1).await.unwrap();
        assert_eq!(ids, BTreeSet::from([1]));
    }

    #[tokio::test]
    async fn depth_is_counted_in_whole_generations() {
        let svc = service();
        assert_eq!(svc.expand_activity_ids(1, 2).await.unwrap(), BTreeSet::from([1, 2, 3]));
        assert_eq!(svc.expand_activity_ids(1, 3).await.unwrap(), BTreeSet::from([1, 2, 3, 4]));
    }

    #[tokio::test]
    async fn growing_depth_never_removes_ids() {
        let svc = service();
        let mut previous = BTreeSet::new();
        for depth in MIN_DEPTH..=MAX_DEPTH {
            let ids = svc.expand_activity_ids(2, depth).await.unwrap();
            assert!(ids.contains(&2));
            assert!(ids.is_superset(&previous));
            previous = ids;
        }
    }

    #[tokio::test]
    async fn leaf_and_unknown_roots_are_singletons() {
        let svc = service();
        assert_eq!(svc.expand_activity_ids(10, 3).await.unwrap(), BTreeSet::from([10]));
        assert_eq!(svc.expand_activity_ids(999, 3).await.unwrap(), BTreeSet::from([999]));
    }

    #[tokio::test]
    async fn depth_outside_range_is_rejected() {
        let svc = service();
        assert!(matches!(
            svc.expand_activity_ids(1, 0).await,
            Err(AppError::InvalidActivityDepth(0))
        ));
        assert!(matches!(
            svc.expand_activity_ids(1, 4).await,
            Err(AppError::InvalidActivityDepth(4))
        ));
    }

    #[tokio::test]
    async fn corrupted_cycle_does_not_loop() {
        // 7 <-> 8, que viola o invariante de floresta
        let repo = InMemoryDirectoryRepository::new()
            .with_activity(activity(7, Some(8)))
            .with_activity(activity(8, Some(7)));
        let svc = ActivityService::new(Arc::new(repo));
        assert_eq!(svc.expand_activity_ids(7, 3).await.unwrap(), BTreeSet::from([7, 8]));
    }

    // Falha só na busca da raiz: o erro do repositório sobe sem ser engolido
    struct RootLookupFails(InMemoryDirectoryRepository);

    #[async_trait::async_trait]
    impl DirectoryRepository for RootLookupFails {
        async fn get_activity_by_id(&self, _id: i32) -> Result<Option<Activity>, AppError> {
            Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut))
        }
        async fn get_child_activities(&self, parent_id: i32) -> Result<Vec<Activity>, AppError> {
            self.0.get_child_activities(parent_id).await
        }
        async fn get_organizations_by_activity_ids(&self, ids: &[i32]) -> Result<Vec<Organization>, AppError> {
            self.0.get_organizations_by_activity_ids(ids).await
        }
        async fn get_organizations_by_name_like(&self, fragment: &str) -> Result<Vec<Organization>, AppError> {
            self.0.get_organizations_by_name_like(fragment).await
        }
        async fn get_organization_by_id(&self, id: i32) -> Result<Option<Organization>, AppError> {
            self.0.get_organization_by_id(id).await
        }
        async fn get_all_buildings(&self) -> Result<Vec<crate::models::directory::BuildingWithOrganizations>, AppError> {
            self.0.get_all_buildings().await
        }
        async fn get_building_by_id(
            &self,
            id: i32,
        ) -> Result<Option<crate::models::directory::BuildingWithOrganizations>, AppError> {
            self.0.get_building_by_id(id).await
        }
    }

    #[tokio::test]
    async fn root_lookup_failure_propagates() {
        let svc = ActivityService::new(Arc::new(RootLookupFails(InMemoryDirectoryRepository::new())));
        assert!(matches!(
            svc.expand_activity_ids(1, 2).await,
            Err(AppError::DatabaseError(_))
        ));
    }

    // Food -> {Meat, Dairy}; a organização só tem Meat
    fn food_tree() -> ActivityService {
        let repo = InMemoryDirectoryRepository::new()
            .with_building(Building {
                id: 1,
                address: "Test Address".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            })
            .with_activity(Activity { id: 1, name: "Food".into(), parent_id: None })
            .with_activity(Activity { id: 2, name: "Meat Products".into(), parent_id: Some(1) })
            .with_activity(Activity { id: 3, name: "Dairy Products".into(), parent_id: Some(1) })
            .with_organization(OrganizationRecord {
                id: 1,
                name: "Meat Shop".into(),
                phone_numbers: vec!["123-456".into()],
                building_id: 1,
                activity_ids: vec![2],
            });
        ActivityService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn child_tagged_organization_needs_depth_two() {
        let svc = food_tree();
        assert!(svc.search_organizations(1, 1).await.unwrap().is_empty());

        let found = svc.search_organizations(1, 2).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Meat Shop");
        assert_eq!(found[0].building.id, 1);
        assert_eq!(found[0].activities[0].name, "Meat Products");
    }

    #[tokio::test]
    async fn unknown_activity_finds_nothing() {
        assert!(food_tree().search_organizations(999, 3).await.unwrap().is_empty());
    }
}
