use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewMeaningSnyant;

/// Synonym or antonym attached to a meaning.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_meaning_snyant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    /// Relation kind code (synonym / antonym).
    pub snyant_type: i32,
    pub snyant_word: String,
    pub snyant_meaning: String,
    pub meaning_idx: i32,
    /// Denormalized owner of `meaning_idx`.
    pub voca_idx: i32,
    pub created_at: String,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::voca_meaning::Entity",
        from = "Column::MeaningIdx",
        to = "super::voca_meaning::Column::Idx",
        on_delete = "Cascade"
    )]
    Meaning,
    #[sea_orm(
        belongs_to = "super::voca::Entity",
        from = "Column::VocaIdx",
        to = "super::voca::Column::Idx",
        on_delete = "Cascade"
    )]
    Voca,
}

impl Related<super::voca_meaning::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meaning.def()
    }
}

impl Related<super::voca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Voca.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewMeaningSnyant> for ActiveModel {
    fn from(input: NewMeaningSnyant) -> Self {
        Self {
            snyant_type: Set(input.snyant_type),
            snyant_word: Set(input.snyant_word),
            snyant_meaning: Set(input.snyant_meaning),
            meaning_idx: Set(input.meaning_idx),
            voca_idx: Set(input.voca_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
