use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::building::{self, Entity as Building};
use crate::errors::ServiceError;
use crate::repositories::{BaseRepository, Repository};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuildingResponse {
    pub id: i32,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<building::Model> for BuildingResponse {
    fn from(model: building::Model) -> Self {
        Self {
            id: model.id,
            address: model.address,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}

/// Read access to buildings.
#[derive(Clone)]
pub struct BuildingService {
    repo: BaseRepository,
}

impl BuildingService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            repo: BaseRepository::new(db),
        }
    }

    pub async fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<BuildingResponse>, ServiceError> {
        let models = self.repo.get_all::<Building>(offset, limit).await?;
        Ok(models.into_iter().map(BuildingResponse::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<BuildingResponse>, ServiceError> {
        let model = self.repo.get::<Building>(id).await?;
        Ok(model.map(BuildingResponse::from))
    }

    /// Case-insensitive address substring search. Folding happens here so
    /// non-ASCII addresses match on every supported backend.
    #[instrument(skip(self))]
    pub async fn search_by_address(
        &self,
        address: &str,
    ) -> Result<Vec<BuildingResponse>, ServiceError> {
        let needle = address.to_lowercase();
        let models = Building::find().all(self.repo.db()).await?;
        Ok(models
            .into_iter()
            .filter(|b| b.address.to_lowercase().contains(&needle))
            .map(BuildingResponse::from)
            .collect())
    }
}
