use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewVocaType;

/// Lookup table shared by every book. Never duplicated by a book copy.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_voca_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub vt_title: String,
    pub created_at: String,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewVocaType> for ActiveModel {
    fn from(input: NewVocaType) -> Self {
        Self {
            vt_title: Set(input.vt_title),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
