use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PrimaryKeyTrait, QuerySelect};
use std::sync::Arc;

use crate::errors::ServiceError;

/// Uniform read access shared by every entity kind: get-by-id and
/// get-all-paged. Services compose a [`BaseRepository`] instead of
/// duplicating fetch logic per entity.
#[async_trait]
pub trait Repository: Send + Sync {
    fn db(&self) -> &DatabaseConnection;

    /// Fetch a single entity by primary key. Absence is `None`, not an error.
    async fn get<E>(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<Option<E::Model>, ServiceError>
    where
        E: EntityTrait,
    {
        E::find_by_id(id)
            .one(self.db())
            .await
            .map_err(ServiceError::from)
    }

    /// Fetch a page of entities in storage-native order. Callers validate
    /// offset >= 0 and limit >= 1 upstream.
    async fn get_all<E>(&self, offset: u64, limit: u64) -> Result<Vec<E::Model>, ServiceError>
    where
        E: EntityTrait,
    {
        E::find()
            .offset(offset)
            .limit(limit)
            .all(self.db())
            .await
            .map_err(ServiceError::from)
    }
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
