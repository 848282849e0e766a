use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::NewCategory;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pt_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idx: i32,
    pub cate_name: String,
    /// Depth in the category tree (1 = top level).
    pub cate_lvl: i32,
    pub cate_pidx: Option<i32>,
    pub created_at: String,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::CatePidx",
        to = "Column::Idx"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewCategory> for ActiveModel {
    fn from(input: NewCategory) -> Self {
        Self {
            cate_name: Set(input.cate_name),
            cate_lvl: Set(input.cate_lvl),
            cate_pidx: Set(input.cate_pidx),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(input.created_by),
            ..Default::default()
        }
    }
}
