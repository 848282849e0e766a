use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewMeaningExample;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_meaning_example")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub ex_sentence: String,
    pub ex_translation: String,
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

impl From<NewMeaningExample> for ActiveModel {
    fn from(input: NewMeaningExample) -> Self {
        Self {
            ex_sentence: Set(input.ex_sentence),
            ex_translation: Set(input.ex_translation),
            meaning_idx: Set(input.meaning_idx),
            voca_idx: Set(input.voca_idx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
