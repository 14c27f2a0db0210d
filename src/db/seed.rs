// src/db/seed.rs

use crate::models::directory::{Activity, Building, DirectorySnapshot, OrganizationRecord};

// Dados de demonstração: 4 prédios, duas árvores de atividades e 5 organizações.
pub fn demo_dataset() -> DirectorySnapshot {
    let building = |id, address: &str, latitude, longitude| Building {
        id,
        address: address.to_string(),
        latitude,
        longitude,
    };
    let activity = |id, name: &str, parent_id| Activity {
        id,
        name: name.to_string(),
        parent_id,
    };
    let organization = |id, name: &str, phones: &[&str], building_id, activity_ids: &[i32]| {
        OrganizationRecord {
            id,
            name: name.to_string(),
            phone_numbers: phones.iter().map(|p| p.to_string()).collect(),
            building_id,
            activity_ids: activity_ids.to_vec(),
        }
    };

    DirectorySnapshot {
        buildings: vec![
            building(1, "г. Москва, ул. Ленина 1, офис 3", 55.7558, 37.6173),
            building(2, "г. Санкт-Петербург, Невский пр., 10", 59.9343, 30.3351),
            building(3, "г. Новосибирск, ул. Красный проспект, 50", 55.0302, 82.9204),
            building(4, "г. Казань, ул. Баумана, 17", 55.7963, 49.1088),
        ],
        // Pais sempre antes dos filhos
        activities: vec![
            activity(1, "Еда", None),
            activity(2, "Мясная продукция", Some(1)),
            activity(3, "Молочная продукция", Some(1)),
            activity(4, "Автомобили", None),
            activity(5, "Запчасти", Some(4)),
            activity(6, "Аксессуары", Some(4)),
        ],
        organizations: vec![
            organization(1, "ООО 'Рога и Копыта'", &["2-222-222", "3-333-333"], 1, &[2]),
            organization(2, "ЗАО 'Молоко и Ко'", &["8-800-555-35-35"], 2, &[1, 3]),
            organization(3, "ООО 'АвтоМир'", &["7-777-777"], 1, &[4, 5]),
            organization(4, "ИП 'Гастроном'", &["8-913-444-55-66"], 3, &[1]),
            organization(5, "АО 'ТехСнаб'", &["7-495-123-45-67"], 4, &[4, 6]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parents_are_declared_before_children() {
        let data = demo_dataset();
        let mut seen = HashSet::new();
        for a in &data.activities {
            if let Some(parent) = a.parent_id {
                assert!(seen.contains(&parent), "atividade {} antes do pai {}", a.id, parent);
            }
            seen.insert(a.id);
        }
    }

    #[test]
    fn every_reference_points_to_an_existing_row() {
        let data = demo_dataset();
        let buildings: HashSet<i32> = data.buildings.iter().map(|b| b.id).collect();
        let activities: HashSet<i32> = data.activities.iter().map(|a| a.id).collect();
        for o in &data.organizations {
            assert!(buildings.contains(&o.building_id));
            assert!(o.activity_ids.iter().all(|id| activities.contains(id)));
        }
    }
}
