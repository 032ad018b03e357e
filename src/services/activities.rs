use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::activity::{self, Entity as Activity};
use crate::errors::ServiceError;
use crate::repositories::{BaseRepository, Repository};

/// Upper bound on nodes visited during one hierarchy expansion. The parent
/// relation is assumed acyclic but nothing upstream enforces that, so the
/// bound turns malformed data into a reportable error instead of a runaway
/// scan.
pub const MAX_CLOSURE_NODES: usize = 10_000;

/// Flat activity projection used in listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivitySummary {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub level: i32,
}

impl From<activity::Model> for ActivitySummary {
    fn from(model: activity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_id: model.parent_id,
            level: model.level,
        }
    }
}

/// Activity with its recursive children and a flat parent reference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityTree {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub level: i32,
    pub children: Vec<ActivityTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ActivitySummary>,
}

/// Read access to the activity classification and its hierarchy.
#[derive(Clone)]
pub struct ActivityService {
    repo: BaseRepository,
}

impl ActivityService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            repo: BaseRepository::new(db),
        }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<ActivitySummary>, ServiceError> {
        let models = self.repo.get_all::<Activity>(offset, limit).await?;
        Ok(models.into_iter().map(ActivitySummary::from).collect())
    }

    pub async fn roots(&self) -> Result<Vec<ActivitySummary>, ServiceError> {
        let models = Activity::find()
            .filter(activity::Column::ParentId.is_null())
            .all(self.repo.db())
            .await?;
        Ok(models.into_iter().map(ActivitySummary::from).collect())
    }

    /// Compute {root} plus every transitive descendant of `root_id`.
    ///
    /// A missing root yields an empty set ("match nothing", not an error).
    /// Expansion is breadth-first with one batched children lookup per hop;
    /// the visited set guarantees each id is expanded at most once, which
    /// keeps the traversal finite even on cyclic data.
    #[instrument(skip(self))]
    pub async fn descendant_closure(&self, root_id: i32) -> Result<HashSet<i32>, ServiceError> {
        if self.repo.get::<Activity>(root_id).await?.is_none() {
            debug!(root_id, "closure requested for unknown activity");
            return Ok(HashSet::new());
        }

        let mut visited: HashSet<i32> = HashSet::from([root_id]);
        let mut frontier: Vec<i32> = vec![root_id];

        while !frontier.is_empty() {
            let child_ids: Vec<i32> = Activity::find()
                .select_only()
                .column(activity::Column::Id)
                .filter(activity::Column::ParentId.is_in(frontier))
                .into_tuple()
                .all(self.repo.db())
                .await?;

            let mut next = Vec::new();
            for id in child_ids {
                if visited.insert(id) {
                    next.push(id);
                }
            }

            if visited.len() > MAX_CLOSURE_NODES {
                return Err(ServiceError::HierarchyLimitExceeded(format!(
                    "activity {} expands past {} nodes; hierarchy data is cyclic or malformed",
                    root_id, MAX_CLOSURE_NODES
                )));
            }

            frontier = next;
        }

        debug!(root_id, size = visited.len(), "closure computed");
        Ok(visited)
    }

    /// Fetch an activity together with its full descendant tree and a flat
    /// reference to its parent.
    #[instrument(skip(self))]
    pub async fn activity_tree(&self, id: i32) -> Result<Option<ActivityTree>, ServiceError> {
        let Some(root) = self.repo.get::<Activity>(id).await? else {
            return Ok(None);
        };

        let parent = match root.parent_id {
            Some(parent_id) => self
                .repo
                .get::<Activity>(parent_id)
                .await?
                .map(ActivitySummary::from),
            None => None,
        };

        // Breadth-first sweep that records the discovery tree. A node that
        // reappears through a malformed cycle keeps only its first position,
        // so the assembled shape is always a finite tree.
        let mut nodes: HashMap<i32, activity::Model> = HashMap::from([(id, root)]);
        let mut children_of: HashMap<i32, Vec<i32>> = HashMap::new();
        let mut visited: HashSet<i32> = HashSet::from([id]);
        let mut frontier: Vec<i32> = vec![id];

        while !frontier.is_empty() {
            let child_rows = Activity::find()
                .filter(activity::Column::ParentId.is_in(frontier))
                .all(self.repo.db())
                .await?;

            let mut next = Vec::new();
            for child in child_rows {
                let Some(parent_id) = child.parent_id else {
                    continue;
                };
                if visited.insert(child.id) {
                    children_of.entry(parent_id).or_default().push(child.id);
                    next.push(child.id);
                    nodes.insert(child.id, child);
                }
            }

            if visited.len() > MAX_CLOSURE_NODES {
                return Err(ServiceError::HierarchyLimitExceeded(format!(
                    "activity {} expands past {} nodes; hierarchy data is cyclic or malformed",
                    id, MAX_CLOSURE_NODES
                )));
            }

            frontier = next;
        }

        Ok(Some(build_subtree(id, &nodes, &children_of, parent)))
    }
}

fn build_subtree(
    id: i32,
    nodes: &HashMap<i32, activity::Model>,
    children_of: &HashMap<i32, Vec<i32>>,
    parent: Option<ActivitySummary>,
) -> ActivityTree {
    let model = &nodes[&id];
    let children = children_of
        .get(&id)
        .map(|child_ids| {
            child_ids
                .iter()
                .map(|child_id| build_subtree(*child_id, nodes, children_of, None))
                .collect()
        })
        .unwrap_or_default();

    ActivityTree {
        id: model.id,
        name: model.name.clone(),
        parent_id: model.parent_id,
        level: model.level,
        children,
        parent,
    }
}
