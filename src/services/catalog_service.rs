//! Catalog Service - plain create/read operations on the catalog tables
//!
//! Nothing here touches more than one table per call; the multi-table copy
//! lives in `book_copy_service`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::domain::{
    DomainError, NewBook, NewChapter, NewChapterUnitMapping, NewMeaningExample, NewMeaningSnyant,
    NewUnit, NewVoca, NewVocaDr, NewVocaMeaning, NewVocaType,
};
use crate::models::{
    book, chapter, chapter_unit_mapping, meaning_example, meaning_snyant, unit, voca, voca_dr,
    voca_meaning, voca_type,
};

/// Offset/limit window for list endpoints
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

async fn ensure_book(db: &DatabaseConnection, idx: i32) -> Result<(), DomainError> {
    let exists = book::Entity::find_by_id(idx).count(db).await? > 0;
    if exists {
        Ok(())
    } else {
        Err(DomainError::NotFound)
    }
}

pub async fn create_voca_type(
    db: &DatabaseConnection,
    input: NewVocaType,
) -> Result<voca_type::Model, DomainError> {
    require("vt_title", &input.vt_title)?;
    Ok(voca_type::ActiveModel::from(input).insert(db).await?)
}

pub async fn list_voca_types(
    db: &DatabaseConnection,
    page: Page,
) -> Result<Vec<voca_type::Model>, DomainError> {
    Ok(voca_type::Entity::find()
        .order_by_asc(voca_type::Column::Idx)
        .offset(page.skip)
        .limit(page.limit)
        .all(db)
        .await?)
}

pub async fn create_book(
    db: &DatabaseConnection,
    input: NewBook,
) -> Result<book::Model, DomainError> {
    require("book_title", &input.book_title)?;
    let model = book::ActiveModel::from(input).insert(db).await?;
    tracing::info!("Book {} created: {}", model.idx, model.book_title);
    Ok(model)
}

pub async fn list_books(
    db: &DatabaseConnection,
    page: Page,
) -> Result<Vec<book::Model>, DomainError> {
    Ok(book::Entity::find()
        .order_by_asc(book::Column::Idx)
        .offset(page.skip)
        .limit(page.limit)
        .all(db)
        .await?)
}

pub async fn get_book(db: &DatabaseConnection, idx: i32) -> Result<book::Model, DomainError> {
    book::Entity::find_by_id(idx)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)
}

pub async fn create_chapter(
    db: &DatabaseConnection,
    input: NewChapter,
) -> Result<chapter::Model, DomainError> {
    require("ch_title", &input.ch_title)?;
    Ok(chapter::ActiveModel::from(input).insert(db).await?)
}

pub async fn list_chapters(
    db: &DatabaseConnection,
    book_idx: i32,
    page: Page,
) -> Result<Vec<chapter::Model>, DomainError> {
    ensure_book(db, book_idx).await?;
    Ok(chapter::Entity::find()
        .filter(chapter::Column::BookIdx.eq(book_idx))
        .order_by_asc(chapter::Column::Idx)
        .offset(page.skip)
        .limit(page.limit)
        .all(db)
        .await?)
}

pub async fn create_unit(
    db: &DatabaseConnection,
    input: NewUnit,
) -> Result<unit::Model, DomainError> {
    require("un_title", &input.un_title)?;
    Ok(unit::ActiveModel::from(input).insert(db).await?)
}

pub async fn list_units(
    db: &DatabaseConnection,
    book_idx: i32,
    page: Page,
) -> Result<Vec<unit::Model>, DomainError> {
    ensure_book(db, book_idx).await?;
    Ok(unit::Entity::find()
        .filter(unit::Column::BookIdx.eq(book_idx))
        .order_by_asc(unit::Column::Idx)
        .offset(page.skip)
        .limit(page.limit)
        .all(db)
        .await?)
}

pub async fn create_mapping(
    db: &DatabaseConnection,
    input: NewChapterUnitMapping,
) -> Result<chapter_unit_mapping::Model, DomainError> {
    Ok(chapter_unit_mapping::ActiveModel::from(input)
        .insert(db)
        .await?)
}

pub async fn create_voca(
    db: &DatabaseConnection,
    input: NewVoca,
) -> Result<voca::Model, DomainError> {
    require("vc_word", &input.vc_word)?;
    Ok(voca::ActiveModel::from(input).insert(db).await?)
}

pub async fn list_vocas(
    db: &DatabaseConnection,
    book_idx: i32,
    page: Page,
) -> Result<Vec<voca::Model>, DomainError> {
    ensure_book(db, book_idx).await?;
    Ok(voca::Entity::find()
        .filter(voca::Column::BookIdx.eq(book_idx))
        .order_by_asc(voca::Column::Idx)
        .offset(page.skip)
        .limit(page.limit)
        .all(db)
        .await?)
}

pub async fn create_derivative(
    db: &DatabaseConnection,
    input: NewVocaDr,
) -> Result<voca_dr::Model, DomainError> {
    require("dr_word", &input.dr_word)?;
    Ok(voca_dr::ActiveModel::from(input).insert(db).await?)
}

pub async fn create_meaning(
    db: &DatabaseConnection,
    input: NewVocaMeaning,
) -> Result<voca_meaning::Model, DomainError> {
    require("mi_meaning", &input.mi_meaning)?;
    Ok(voca_meaning::ActiveModel::from(input).insert(db).await?)
}

/// The example's `voca_idx` must be the owner of its meaning.
pub async fn create_example(
    db: &DatabaseConnection,
    input: NewMeaningExample,
) -> Result<meaning_example::Model, DomainError> {
    require("ex_sentence", &input.ex_sentence)?;
    check_meaning_owner(db, input.meaning_idx, input.voca_idx).await?;
    Ok(meaning_example::ActiveModel::from(input)
        .insert(db)
        .await?)
}

/// Same owner rule as examples.
pub async fn create_snyant(
    db: &DatabaseConnection,
    input: NewMeaningSnyant,
) -> Result<meaning_snyant::Model, DomainError> {
    require("snyant_word", &input.snyant_word)?;
    check_meaning_owner(db, input.meaning_idx, input.voca_idx).await?;
    Ok(meaning_snyant::ActiveModel::from(input)
        .insert(db)
        .await?)
}

async fn check_meaning_owner(
    db: &DatabaseConnection,
    meaning_idx: i32,
    voca_idx: i32,
) -> Result<(), DomainError> {
    let meaning = voca_meaning::Entity::find_by_id(meaning_idx)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::Validation(format!("meaning {} does not exist", meaning_idx)))?;

    if meaning.voca_idx != voca_idx {
        return Err(DomainError::Validation(format!(
            "meaning {} belongs to voca {}, not {}",
            meaning_idx, meaning.voca_idx, voca_idx
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    async fn book_with_voca(db: &DatabaseConnection) -> (book::Model, voca::Model) {
        let vt = create_voca_type(
            db,
            NewVocaType {
                vt_title: "noun".to_string(),
                created_by: None,
            },
        )
        .await
        .unwrap();
        let book = create_book(
            db,
            NewBook {
                book_title: "Reader".to_string(),
                book_isbn: None,
                book_imagelink: None,
                cate_lvl1_idx: None,
                cate_lvl2_idx: None,
                created_by: None,
            },
        )
        .await
        .unwrap();
        let unit = create_unit(
            db,
            NewUnit {
                un_title: "U1".to_string(),
                un_order: 1,
                book_idx: book.idx,
                created_by: None,
            },
        )
        .await
        .unwrap();
        let voca = create_voca(
            db,
            NewVoca {
                vc_word: "apple".to_string(),
                vt_idx: vt.idx,
                vc_type: 0,
                vc_root: None,
                vc_unikey: None,
                vc_mp3_link: None,
                vc_order: 1,
                un_idx: unit.idx,
                book_idx: book.idx,
                created_by: None,
            },
        )
        .await
        .unwrap();
        (book, voca)
    }

    #[tokio::test]
    async fn test_list_children_of_missing_book_is_not_found() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");

        assert!(matches!(
            list_chapters(&db, 5, Page::default()).await.unwrap_err(),
            DomainError::NotFound
        ));
        assert!(matches!(
            list_vocas(&db, 5, Page::default()).await.unwrap_err(),
            DomainError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_example_must_point_at_meaning_owner() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        let (book, voca) = book_with_voca(&db).await;
        let meaning = create_meaning(
            &db,
            NewVocaMeaning {
                mi_meaning: "사과".to_string(),
                mi_engmeaning: None,
                mi_order: 1,
                voca_idx: voca.idx,
                created_by: None,
            },
        )
        .await
        .unwrap();

        let err = create_example(
            &db,
            NewMeaningExample {
                ex_sentence: "An apple a day.".to_string(),
                ex_translation: "하루 사과 한 개.".to_string(),
                meaning_idx: meaning.idx,
                voca_idx: voca.idx + 100,
                created_by: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let ok = create_example(
            &db,
            NewMeaningExample {
                ex_sentence: "An apple a day.".to_string(),
                ex_translation: "하루 사과 한 개.".to_string(),
                meaning_idx: meaning.idx,
                voca_idx: voca.idx,
                created_by: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(ok.voca_idx, voca.idx);

        let vocas = list_vocas(&db, book.idx, Page::default()).await.unwrap();
        assert_eq!(vocas.len(), 1);
    }

    #[tokio::test]
    async fn test_voca_with_unknown_unit_is_rejected_by_store() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        let (book, voca) = book_with_voca(&db).await;

        let err = create_voca(
            &db,
            NewVoca {
                vc_word: "ghost".to_string(),
                vt_idx: voca.vt_idx,
                vc_type: 0,
                vc_root: None,
                vc_unikey: None,
                vc_mp3_link: None,
                vc_order: 2,
                un_idx: 9999,
                book_idx: book.idx,
                created_by: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::Database(_)));
    }
}
