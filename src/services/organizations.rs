use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::activity::{self, Entity as Activity};
use crate::entities::building::{self, Entity as Building};
use crate::entities::organization::{self, Entity as Organization};
use crate::entities::organization_activity::{self, Entity as OrganizationActivity};
use crate::entities::phone_number::{self, Entity as PhoneNumber};
use crate::errors::ServiceError;
use crate::repositories::{BaseRepository, Repository};
use crate::services::activities::ActivityService;
use crate::services::buildings::BuildingResponse;

/// Lightweight projection for listings: no nested detail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationSummary {
    pub id: i32,
    pub name: String,
    pub building_id: i32,
}

impl From<organization::Model> for OrganizationSummary {
    fn from(model: organization::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            building_id: model.building_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhoneNumberRef {
    pub id: i32,
    pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityRef {
    pub id: i32,
    pub name: String,
}

/// Full organization shape with its building, activities, and phone numbers
/// attached. Assembled entirely from the composer's batched fetches; rendering
/// one never triggers further queries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDetail {
    pub id: i32,
    pub name: String,
    pub building_id: i32,
    pub building: BuildingResponse,
    pub activities: Vec<ActivityRef>,
    pub phone_numbers: Vec<PhoneNumberRef>,
}

/// Executes the supported organization lookups. Every detail-returning mode
/// eager-loads related rows in a fixed number of batched queries.
#[derive(Clone)]
pub struct OrganizationService {
    repo: BaseRepository,
    activities: Arc<ActivityService>,
}

impl OrganizationService {
    pub fn new(db: Arc<DbPool>, activities: Arc<ActivityService>) -> Self {
        Self {
            repo: BaseRepository::new(db),
            activities,
        }
    }

    /// Paged listing in the lightweight shape.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<OrganizationSummary>, ServiceError> {
        let models = self.repo.get_all::<Organization>(offset, limit).await?;
        Ok(models.into_iter().map(OrganizationSummary::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<OrganizationDetail>, ServiceError> {
        let Some(model) = self.repo.get::<Organization>(id).await? else {
            return Ok(None);
        };
        let mut details = self.load_details(vec![model]).await?;
        Ok(details.pop())
    }

    #[instrument(skip(self))]
    pub async fn by_building(
        &self,
        building_id: i32,
    ) -> Result<Vec<OrganizationDetail>, ServiceError> {
        let models = Organization::find()
            .filter(organization::Column::BuildingId.eq(building_id))
            .all(self.repo.db())
            .await?;
        self.load_details(models).await
    }

    /// Organizations associated with exactly this activity id.
    #[instrument(skip(self))]
    pub async fn by_activity(
        &self,
        activity_id: i32,
    ) -> Result<Vec<OrganizationDetail>, ServiceError> {
        let links = OrganizationActivity::find()
            .filter(organization_activity::Column::ActivityId.eq(activity_id))
            .all(self.repo.db())
            .await?;
        let org_ids: HashSet<i32> = links.into_iter().map(|l| l.organization_id).collect();
        self.fetch_by_ids(org_ids).await
    }

    /// Organizations associated with the activity or any of its descendants.
    /// An organization tagged with several matching activities appears once.
    #[instrument(skip(self))]
    pub async fn by_activity_tree(
        &self,
        activity_id: i32,
    ) -> Result<Vec<OrganizationDetail>, ServiceError> {
        let closure = self.activities.descendant_closure(activity_id).await?;
        if closure.is_empty() {
            return Ok(Vec::new());
        }

        let links = OrganizationActivity::find()
            .filter(organization_activity::Column::ActivityId.is_in(closure))
            .all(self.repo.db())
            .await?;
        let org_ids: HashSet<i32> = links.into_iter().map(|l| l.organization_id).collect();
        self.fetch_by_ids(org_ids).await
    }

    /// Organizations whose building lies inside the rectangle, bounds
    /// inclusive. Inverted bounds simply match nothing.
    #[instrument(skip(self))]
    pub async fn in_rectangle(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Vec<OrganizationDetail>, ServiceError> {
        let building_ids: Vec<i32> = Building::find()
            .select_only()
            .column(building::Column::Id)
            .filter(building::Column::Latitude.gte(min_lat))
            .filter(building::Column::Latitude.lte(max_lat))
            .filter(building::Column::Longitude.gte(min_lon))
            .filter(building::Column::Longitude.lte(max_lon))
            .into_tuple()
            .all(self.repo.db())
            .await?;
        if building_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Organization::find()
            .filter(organization::Column::BuildingId.is_in(building_ids))
            .all(self.repo.db())
            .await?;
        self.load_details(models).await
    }

    /// Case-insensitive name substring search. Folding happens in the
    /// service so non-ASCII names (e.g. Cyrillic) match on every supported
    /// backend; the candidate scan projects only (id, name).
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<OrganizationDetail>, ServiceError> {
        let needle = name.to_lowercase();
        let candidates: Vec<(i32, String)> = Organization::find()
            .select_only()
            .column(organization::Column::Id)
            .column(organization::Column::Name)
            .into_tuple()
            .all(self.repo.db())
            .await?;

        let matching_ids: HashSet<i32> = candidates
            .into_iter()
            .filter(|(_, candidate)| name_matches(candidate, &needle))
            .map(|(id, _)| id)
            .collect();
        self.fetch_by_ids(matching_ids).await
    }

    /// Primary fetch for id-set modes. The set input guarantees one row per
    /// organization no matter how many join-table rows matched it.
    async fn fetch_by_ids(
        &self,
        org_ids: HashSet<i32>,
    ) -> Result<Vec<OrganizationDetail>, ServiceError> {
        if org_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = Organization::find()
            .filter(organization::Column::Id.is_in(org_ids))
            .all(self.repo.db())
            .await?;
        self.load_details(models).await
    }

    /// Attach buildings, phone numbers, and activities to the fetched rows:
    /// one batched query per relation, assembled through id-keyed maps.
    async fn load_details(
        &self,
        organizations: Vec<organization::Model>,
    ) -> Result<Vec<OrganizationDetail>, ServiceError> {
        if organizations.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.repo.db();

        let org_ids: Vec<i32> = organizations.iter().map(|o| o.id).collect();
        let building_ids: HashSet<i32> = organizations.iter().map(|o| o.building_id).collect();

        let buildings: HashMap<i32, building::Model> = Building::find()
            .filter(building::Column::Id.is_in(building_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        let mut phones_of: HashMap<i32, Vec<PhoneNumberRef>> = HashMap::new();
        let phone_rows = PhoneNumber::find()
            .filter(phone_number::Column::OrganizationId.is_in(org_ids.clone()))
            .all(db)
            .await?;
        for phone in phone_rows {
            phones_of
                .entry(phone.organization_id)
                .or_default()
                .push(PhoneNumberRef {
                    id: phone.id,
                    number: phone.number,
                });
        }

        let links = OrganizationActivity::find()
            .filter(organization_activity::Column::OrganizationId.is_in(org_ids))
            .all(db)
            .await?;
        let activity_ids: HashSet<i32> = links.iter().map(|l| l.activity_id).collect();
        let activity_names: HashMap<i32, String> = if activity_ids.is_empty() {
            HashMap::new()
        } else {
            Activity::find()
                .filter(activity::Column::Id.is_in(activity_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|a| (a.id, a.name))
                .collect()
        };
        let mut activities_of: HashMap<i32, Vec<ActivityRef>> = HashMap::new();
        for link in links {
            if let Some(name) = activity_names.get(&link.activity_id) {
                activities_of
                    .entry(link.organization_id)
                    .or_default()
                    .push(ActivityRef {
                        id: link.activity_id,
                        name: name.clone(),
                    });
            }
        }

        organizations
            .into_iter()
            .map(|org| {
                let building = buildings.get(&org.building_id).cloned().ok_or_else(|| {
                    ServiceError::InternalError(format!(
                        "organization {} references missing building {}",
                        org.id, org.building_id
                    ))
                })?;
                Ok(OrganizationDetail {
                    id: org.id,
                    building_id: org.building_id,
                    name: org.name,
                    building: BuildingResponse::from(building),
                    activities: activities_of.remove(&org.id).unwrap_or_default(),
                    phone_numbers: phones_of.remove(&org.id).unwrap_or_default(),
                })
            })
            .collect()
    }
}

fn name_matches(candidate: &str, needle_lower: &str) -> bool {
    candidate.to_lowercase().contains(needle_lower)
}
