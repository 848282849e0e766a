use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewVocaDr;

/// Derivative word of a vocabulary entry.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_voca_dr")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub dr_word: String,
    pub dr_meaning: String,
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
}

impl Related<super::voca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Voca.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewVocaDr> for ActiveModel {
    fn from(input: NewVocaDr) -> Self {
        Self {
            dr_word: Set(input.dr_word),
            dr_meaning: Set(input.dr_meaning),
            voca_idx: Set(input.voca_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
