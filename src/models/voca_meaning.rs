use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewVocaMeaning;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_voca_meaning")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub mi_meaning: String,
    pub mi_engmeaning: Option<String>,
    pub mi_order: i32,
    pub voca_idx: i32,
    pub created_at: String,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::voca::Entity",
        from = "Column::VocaIdx",
        to = "super::voca::Column::Idx",
        on_delete = "Cascade"
    )]
    Voca,
    #[sea_orm(has_many = "super::meaning_example::Entity")]
    Examples,
    #[sea_orm(has_many = "super::meaning_snyant::Entity")]
    Snyants,
}

impl Related<super::voca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Voca.def()
    }
}

impl Related<super::meaning_example::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Examples.def()
    }
}

impl Related<super::meaning_snyant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Snyants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewVocaMeaning> for ActiveModel {
    fn from(input: NewVocaMeaning) -> Self {
        Self {
            mi_meaning: Set(input.mi_meaning),
            mi_engmeaning: Set(input.mi_engmeaning),
            mi_order: Set(input.mi_order),
            voca_idx: Set(input.voca_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
