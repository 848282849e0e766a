//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::Deserialize;

use super::DomainError;
use crate::models::{
    book, chapter, chapter_unit_mapping, meaning_example, meaning_snyant, unit, voca, voca_dr,
    voca_meaning,
};

/// Input for creating a category
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub cate_name: String,
    pub cate_lvl: i32,
    pub cate_pidx: Option<i32>,
    pub created_by: Option<i32>,
}

/// Input for creating a vocabulary type
#[derive(Debug, Clone, Deserialize)]
pub struct NewVocaType {
    pub vt_title: String,
    pub created_by: Option<i32>,
}

/// Input for creating a book
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub book_title: String,
    pub book_isbn: Option<String>,
    pub book_imagelink: Option<String>,
    pub cate_lvl1_idx: Option<i32>,
    pub cate_lvl2_idx: Option<i32>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewChapter {
    pub ch_title: String,
    pub ch_order: i32,
    pub book_idx: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUnit {
    pub un_title: String,
    pub un_order: i32,
    pub book_idx: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewChapterUnitMapping {
    pub ch_idx: i32,
    pub un_idx: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVoca {
    pub vc_word: String,
    pub vt_idx: i32,
    pub vc_type: i32,
    pub vc_root: Option<String>,
    pub vc_unikey: Option<String>,
    pub vc_mp3_link: Option<String>,
    pub vc_order: i32,
    pub un_idx: i32,
    pub book_idx: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVocaDr {
    pub dr_word: String,
    pub dr_meaning: String,
    pub voca_idx: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVocaMeaning {
    pub mi_meaning: String,
    pub mi_engmeaning: Option<String>,
    pub mi_order: i32,
    pub voca_idx: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMeaningExample {
    pub ex_sentence: String,
    pub ex_translation: String,
    pub meaning_idx: i32,
    pub voca_idx: i32,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMeaningSnyant {
    pub snyant_type: i32,
    pub snyant_word: String,
    pub snyant_meaning: String,
    pub meaning_idx: i32,
    pub voca_idx: i32,
    pub created_by: Option<i32>,
}

/// Entry point to the catalog tables: hands out units of work.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    type Tx: CatalogTx;

    /// Open a unit of work. Dropping it without `commit` discards its writes.
    async fn begin(&self) -> Result<Self::Tx, DomainError>;

    /// Read a book outside of any unit of work (sees committed rows only)
    async fn find_book(&self, idx: i32) -> Result<Option<book::Model>, DomainError>;
}

/// One unit of work over the catalog tables.
///
/// Reads observe the writes already issued through the same unit of work.
/// Child lookups return rows ordered by `idx`.
#[async_trait]
pub trait CatalogTx: Send + Sync {
    async fn find_book(&self, idx: i32) -> Result<Option<book::Model>, DomainError>;

    async fn chapters_of_book(&self, book_idx: i32) -> Result<Vec<chapter::Model>, DomainError>;

    async fn units_of_book(&self, book_idx: i32) -> Result<Vec<unit::Model>, DomainError>;

    /// Mapping rows whose chapter is one of `ch_idxs`
    async fn mappings_of_chapters(
        &self,
        ch_idxs: &[i32],
    ) -> Result<Vec<chapter_unit_mapping::Model>, DomainError>;

    async fn vocas_of_book(&self, book_idx: i32) -> Result<Vec<voca::Model>, DomainError>;

    async fn derivatives_of_voca(
        &self,
        voca_idx: i32,
    ) -> Result<Vec<voca_dr::Model>, DomainError>;

    async fn meanings_of_voca(
        &self,
        voca_idx: i32,
    ) -> Result<Vec<voca_meaning::Model>, DomainError>;

    async fn examples_of_meaning(
        &self,
        meaning_idx: i32,
    ) -> Result<Vec<meaning_example::Model>, DomainError>;

    async fn snyants_of_meaning(
        &self,
        meaning_idx: i32,
    ) -> Result<Vec<meaning_snyant::Model>, DomainError>;

    async fn insert_book(&self, input: NewBook) -> Result<book::Model, DomainError>;

    async fn insert_chapter(&self, input: NewChapter) -> Result<chapter::Model, DomainError>;

    async fn insert_unit(&self, input: NewUnit) -> Result<unit::Model, DomainError>;

    async fn insert_mapping(
        &self,
        input: NewChapterUnitMapping,
    ) -> Result<chapter_unit_mapping::Model, DomainError>;

    async fn insert_voca(&self, input: NewVoca) -> Result<voca::Model, DomainError>;

    async fn insert_derivative(&self, input: NewVocaDr) -> Result<voca_dr::Model, DomainError>;

    async fn insert_meaning(
        &self,
        input: NewVocaMeaning,
    ) -> Result<voca_meaning::Model, DomainError>;

    async fn insert_example(
        &self,
        input: NewMeaningExample,
    ) -> Result<meaning_example::Model, DomainError>;

    async fn insert_snyant(
        &self,
        input: NewMeaningSnyant,
    ) -> Result<meaning_snyant::Model, DomainError>;

    /// Make every write of this unit of work durable
    async fn commit(self) -> Result<(), DomainError>;

    /// Discard every write of this unit of work
    async fn rollback(self) -> Result<(), DomainError>;
}
