use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    /// Advisory nesting depth hint set by the seed data; traversal never
    /// relies on it.
    pub level: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        super::organization_activity::Relation::Organization.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::organization_activity::Relation::Activity
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
