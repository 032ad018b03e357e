pub mod activities;
pub mod buildings;
pub mod common;
pub mod organizations;

use std::sync::Arc;

use crate::db::DbPool;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates the directory lookups used by HTTP
/// handlers
#[derive(Clone)]
pub struct AppServices {
    pub organizations: Arc<crate::services::organizations::OrganizationService>,
    pub buildings: Arc<crate::services::buildings::BuildingService>,
    pub activities: Arc<crate::services::activities::ActivityService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        let activities = Arc::new(crate::services::activities::ActivityService::new(
            db_pool.clone(),
        ));
        let buildings = Arc::new(crate::services::buildings::BuildingService::new(
            db_pool.clone(),
        ));
        let organizations = Arc::new(crate::services::organizations::OrganizationService::new(
            db_pool,
            activities.clone(),
        ));

        Self {
            organizations,
            buildings,
            activities,
        }
    }
}
