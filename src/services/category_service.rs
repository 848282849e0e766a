//! Category Service - category rows and their single-row copy

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

use crate::domain::{DomainError, NewCategory};
use crate::models::category::{self, Entity as CategoryEntity};

pub async fn create_category(
    db: &DatabaseConnection,
    input: NewCategory,
) -> Result<category::Model, DomainError> {
    if input.cate_name.trim().is_empty() {
        return Err(DomainError::Validation("cate_name must not be empty".to_string()));
    }
    if input.cate_lvl < 1 {
        return Err(DomainError::Validation("cate_lvl must be at least 1".to_string()));
    }

    Ok(category::ActiveModel::from(input).insert(db).await?)
}

pub async fn list_categories(
    db: &DatabaseConnection,
    skip: u64,
    limit: u64,
) -> Result<Vec<category::Model>, DomainError> {
    Ok(CategoryEntity::find()
        .order_by_asc(category::Column::Idx)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?)
}

pub async fn get_category(
    db: &DatabaseConnection,
    idx: i32,
) -> Result<category::Model, DomainError> {
    CategoryEntity::find_by_id(idx)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)
}

/// Duplicate one category under the same parent, its name prefixed with
/// `name_prefix`. Children are not copied.
pub async fn copy_category(
    db: &DatabaseConnection,
    source_idx: i32,
    name_prefix: &str,
) -> Result<category::Model, DomainError> {
    let original = get_category(db, source_idx).await?;

    let copy = category::ActiveModel {
        cate_name: Set(format!("{}{}", name_prefix, original.cate_name)),
        cate_lvl: Set(original.cate_lvl),
        cate_pidx: Set(original.cate_pidx),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        created_by: Set(original.created_by),
        ..Default::default()
    };

    let model = copy.insert(db).await?;
    tracing::info!("Category {} copied as {}", source_idx, model.idx);
    Ok(model)
}
