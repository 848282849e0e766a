use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewChapter;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_chapter")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub ch_title: String,
    pub ch_order: i32,
    pub book_idx: i32,
    pub created_at: String,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookIdx",
        to = "super::book::Column::Idx",
        on_delete = "Cascade"
    )]
    Book,
    #[sea_orm(has_many = "super::chapter_unit_mapping::Entity")]
    UnitsMapping,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::chapter_unit_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnitsMapping.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        super::chapter_unit_mapping::Relation::Unit.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::chapter_unit_mapping::Relation::Chapter.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewChapter> for ActiveModel {
    fn from(input: NewChapter) -> Self {
        Self {
            ch_title: Set(input.ch_title),
            ch_order: Set(input.ch_order),
            book_idx: Set(input.book_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
