use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewChapterUnitMapping;

/// Join row of the chapter/unit many-to-many relation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_ch_un_mapping")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub ch_idx: i32,
    pub un_idx: i32,
    pub created_at: String,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chapter::Entity",
        from = "Column::ChIdx",
        to = "super::chapter::Column::Idx",
        on_delete = "Cascade"
    )]
    Chapter,
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnIdx",
        to = "super::unit::Column::Idx",
        on_delete = "Cascade"
    )]
    Unit,
}

impl Related<super::chapter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chapter.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewChapterUnitMapping> for ActiveModel {
    fn from(input: NewChapterUnitMapping) -> Self {
        Self {
            ch_idx: Set(input.ch_idx),
            un_idx: Set(input.un_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
