use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewBook;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_book")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub book_title: String,
    pub book_isbn: Option<String>,
    pub book_imagelink: Option<String>,
    pub cate_lvl1_idx: Option<i32>,
    pub cate_lvl2_idx: Option<i32>,
    pub created_at: String,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chapter::Entity")]
    Chapters,
    #[sea_orm(has_many = "super::unit::Entity")]
    Units,
    #[sea_orm(has_many = "super::voca::Entity")]
    Vocas,
}

impl Related<super::chapter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chapters.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Units.def()
    }
}

impl Related<super::voca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vocas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewBook> for ActiveModel {
    fn from(input: NewBook) -> Self {
        Self {
            book_title: Set(input.book_title),
            book_isbn: Set(input.book_isbn),
            book_imagelink: Set(input.book_imagelink),
            cate_lvl1_idx: Set(input.cate_lvl1_idx),
            cate_lvl2_idx: Set(input.cate_lvl2_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
