pub mod geo_filter;
pub mod activity_service;
pub use activity_service::ActivityService;
pub mod organization_service;
pub use organization_service::OrganizationService;
pub mod building_service;
pub use building_service::BuildingService;
