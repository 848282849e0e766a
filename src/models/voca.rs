use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewVoca;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_voca")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub vc_word: String,
    pub vt_idx: i32,
    pub vc_type: i32,
    pub vc_root: Option<String>,
    pub vc_unikey: Option<String>,
    pub vc_mp3_link: Option<String>,
    pub vc_order: i32,
    pub un_idx: i32,
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
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnIdx",
        to = "super::unit::Column::Idx",
        on_delete = "Cascade"
    )]
    Unit,
    #[sea_orm(
        belongs_to = "super::voca_type::Entity",
        from = "Column::VtIdx",
        to = "super::voca_type::Column::Idx"
    )]
    VocaType,
    #[sea_orm(has_many = "super::voca_dr::Entity")]
    Derivatives,
    #[sea_orm(has_many = "super::voca_meaning::Entity")]
    Meanings,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::voca_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VocaType.def()
    }
}

impl Related<super::voca_dr::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Derivatives.def()
    }
}

impl Related<super::voca_meaning::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meanings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewVoca> for ActiveModel {
    fn from(input: NewVoca) -> Self {
        Self {
            vc_word: Set(input.vc_word),
            vt_idx: Set(input.vt_idx),
            vc_type: Set(input.vc_type),
            vc_root: Set(input.vc_root),
            vc_unikey: Set(input.vc_unikey),
            vc_mp3_link: Set(input.vc_mp3_link),
            vc_order: Set(input.vc_order),
            un_idx: Set(input.un_idx),
            book_idx: Set(input.book_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
