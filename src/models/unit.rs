use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewUnit;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_unit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub un_title: String,
    pub un_order: i32,
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
    ChaptersMapping,
    #[sea_orm(has_many = "super::voca::Entity")]
    Vocas,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::chapter_unit_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChaptersMapping.def()
    }
}

impl Related<super::voca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vocas.def()
    }
}

impl Related<super::chapter::Entity> for Entity {
    fn to() -> RelationDef {
        super::chapter_unit_mapping::Relation::Chapter.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::chapter_unit_mapping::Relation::Unit.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewUnit> for ActiveModel {
    fn from(input: NewUnit) -> Self {
        Self {
            un_title: Set(input.un_title),
            un_order: Set(input.un_order),
            book_idx: Set(input.book_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
