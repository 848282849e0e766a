//! Demo catalog data
//!
//! One small book exercising every level of the copy walk: two chapters, two
//! units, one chapter/unit mapping and one word in the first unit with a
//! derivative, a meaning, an example and a synonym.

use sea_orm::{ActiveModelTrait, DatabaseConnection};

use crate::domain::{
    CatalogStore, CatalogTx, DomainError, NewBook, NewCategory, NewChapter,
    NewChapterUnitMapping, NewMeaningExample, NewMeaningSnyant, NewUnit, NewVoca, NewVocaDr,
    NewVocaMeaning, NewVocaType,
};
use crate::infrastructure::SeaOrmCatalogStore;
use crate::models::{category, voca_type};

/// Shared rows the demo book points at without owning
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoRefs {
    pub cate_lvl1_idx: Option<i32>,
    pub cate_lvl2_idx: Option<i32>,
    pub vt_idx: i32,
    pub created_by: Option<i32>,
}

/// Ids of every row of the demo book
#[derive(Debug, Clone)]
pub struct DemoBook {
    pub book: i32,
    pub chapters: [i32; 2],
    pub units: [i32; 2],
    pub mapping: i32,
    pub voca: i32,
    pub derivative: i32,
    pub meaning: i32,
    pub example: i32,
    pub snyant: i32,
}

impl DemoBook {
    pub const ROWS: usize = 11;
}

/// Write the demo book through `store` in a single unit of work
pub async fn seed_demo_book<S: CatalogStore>(
    store: &S,
    refs: DemoRefs,
) -> Result<DemoBook, DomainError> {
    let tx = store.begin().await?;

    let book = tx
        .insert_book(NewBook {
            book_title: "Essential Words 1".to_string(),
            book_isbn: Some("9788900000011".to_string()),
            book_imagelink: Some("https://img.example.com/essential-1.jpg".to_string()),
            cate_lvl1_idx: refs.cate_lvl1_idx,
            cate_lvl2_idx: refs.cate_lvl2_idx,
            created_by: refs.created_by,
        })
        .await?;

    let mut chapters = [0; 2];
    let mut units = [0; 2];
    for i in 0..2 {
        chapters[i] = tx
            .insert_chapter(NewChapter {
                ch_title: format!("Chapter {}", i + 1),
                ch_order: i as i32 + 1,
                book_idx: book.idx,
                created_by: refs.created_by,
            })
            .await?
            .idx;
        units[i] = tx
            .insert_unit(NewUnit {
                un_title: format!("Unit {}", i + 1),
                un_order: i as i32 + 1,
                book_idx: book.idx,
                created_by: refs.created_by,
            })
            .await?
            .idx;
    }

    let mapping = tx
        .insert_mapping(NewChapterUnitMapping {
            ch_idx: chapters[0],
            un_idx: units[0],
            created_by: refs.created_by,
        })
        .await?;

    let voca = tx
        .insert_voca(NewVoca {
            vc_word: "abandon".to_string(),
            vt_idx: refs.vt_idx,
            vc_type: 1,
            vc_root: Some("a + bandon".to_string()),
            vc_unikey: Some("abandon-v".to_string()),
            vc_mp3_link: Some("https://audio.example.com/abandon.mp3".to_string()),
            vc_order: 1,
            un_idx: units[0],
            book_idx: book.idx,
            created_by: refs.created_by,
        })
        .await?;

    let derivative = tx
        .insert_derivative(NewVocaDr {
            dr_word: "abandonment".to_string(),
            dr_meaning: "the act of abandoning".to_string(),
            voca_idx: voca.idx,
            created_by: refs.created_by,
        })
        .await?;

    let meaning = tx
        .insert_meaning(NewVocaMeaning {
            mi_meaning: "버리다".to_string(),
            mi_engmeaning: Some("to leave behind".to_string()),
            mi_order: 1,
            voca_idx: voca.idx,
            created_by: refs.created_by,
        })
        .await?;

    let example = tx
        .insert_example(NewMeaningExample {
            ex_sentence: "They abandoned the car.".to_string(),
            ex_translation: "그들은 차를 버렸다.".to_string(),
            meaning_idx: meaning.idx,
            voca_idx: voca.idx,
            created_by: refs.created_by,
        })
        .await?;

    let snyant = tx
        .insert_snyant(NewMeaningSnyant {
            snyant_type: 1,
            snyant_word: "desert".to_string(),
            snyant_meaning: "to leave".to_string(),
            meaning_idx: meaning.idx,
            voca_idx: voca.idx,
            created_by: refs.created_by,
        })
        .await?;

    tx.commit().await?;

    Ok(DemoBook {
        book: book.idx,
        chapters,
        units,
        mapping: mapping.idx,
        voca: voca.idx,
        derivative: derivative.idx,
        meaning: meaning.idx,
        example: example.idx,
        snyant: snyant.idx,
    })
}

/// Create the lookup rows (categories, vocabulary type) and the demo book
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<DemoBook, DomainError> {
    let lvl1 = category::ActiveModel::from(NewCategory {
        cate_name: "English".to_string(),
        cate_lvl: 1,
        cate_pidx: None,
        created_by: Some(1),
    })
    .insert(db)
    .await?;

    let lvl2 = category::ActiveModel::from(NewCategory {
        cate_name: "Middle School".to_string(),
        cate_lvl: 2,
        cate_pidx: Some(lvl1.idx),
        created_by: Some(1),
    })
    .insert(db)
    .await?;

    let verb = voca_type::ActiveModel::from(NewVocaType {
        vt_title: "verb".to_string(),
        created_by: Some(1),
    })
    .insert(db)
    .await?;

    let store = SeaOrmCatalogStore::new(db.clone());
    seed_demo_book(
        &store,
        DemoRefs {
            cate_lvl1_idx: Some(lvl1.idx),
            cate_lvl2_idx: Some(lvl2.idx),
            vt_idx: verb.idx,
            created_by: Some(1),
        },
    )
    .await
}
