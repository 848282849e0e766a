//! SeaORM implementation of CatalogStore

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::domain::{
    CatalogStore, CatalogTx, DomainError, NewBook, NewChapter, NewChapterUnitMapping,
    NewMeaningExample, NewMeaningSnyant, NewUnit, NewVoca, NewVocaDr, NewVocaMeaning,
};
use crate::models::{
    book, chapter, chapter_unit_mapping, meaning_example, meaning_snyant, unit, voca, voca_dr,
    voca_meaning,
};

/// SeaORM-based implementation of CatalogStore
#[derive(Clone)]
pub struct SeaOrmCatalogStore {
    db: DatabaseConnection,
}

impl SeaOrmCatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogStore for SeaOrmCatalogStore {
    type Tx = SeaOrmCatalogTx;

    async fn begin(&self) -> Result<SeaOrmCatalogTx, DomainError> {
        let txn = self.db.begin().await?;
        Ok(SeaOrmCatalogTx { txn })
    }

    async fn find_book(&self, idx: i32) -> Result<Option<book::Model>, DomainError> {
        Ok(book::Entity::find_by_id(idx).one(&self.db).await?)
    }
}

/// A database transaction. SeaORM rolls it back when dropped uncommitted.
pub struct SeaOrmCatalogTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl CatalogTx for SeaOrmCatalogTx {
    async fn find_book(&self, idx: i32) -> Result<Option<book::Model>, DomainError> {
        Ok(book::Entity::find_by_id(idx).one(&self.txn).await?)
    }

    async fn chapters_of_book(&self, book_idx: i32) -> Result<Vec<chapter::Model>, DomainError> {
        Ok(chapter::Entity::find()
            .filter(chapter::Column::BookIdx.eq(book_idx))
            .order_by_asc(chapter::Column::Idx)
            .all(&self.txn)
            .await?)
    }

    async fn units_of_book(&self, book_idx: i32) -> Result<Vec<unit::Model>, DomainError> {
        Ok(unit::Entity::find()
            .filter(unit::Column::BookIdx.eq(book_idx))
            .order_by_asc(unit::Column::Idx)
            .all(&self.txn)
            .await?)
    }

    async fn mappings_of_chapters(
        &self,
        ch_idxs: &[i32],
    ) -> Result<Vec<chapter_unit_mapping::Model>, DomainError> {
        if ch_idxs.is_empty() {
            return Ok(Vec::new());
        }

        Ok(chapter_unit_mapping::Entity::find()
            .filter(chapter_unit_mapping::Column::ChIdx.is_in(ch_idxs.iter().copied()))
            .order_by_asc(chapter_unit_mapping::Column::Idx)
            .all(&self.txn)
            .await?)
    }

    async fn vocas_of_book(&self, book_idx: i32) -> Result<Vec<voca::Model>, DomainError> {
        Ok(voca::Entity::find()
            .filter(voca::Column::BookIdx.eq(book_idx))
            .order_by_asc(voca::Column::Idx)
            .all(&self.txn)
            .await?)
    }

    async fn derivatives_of_voca(
        &self,
        voca_idx: i32,
    ) -> Result<Vec<voca_dr::Model>, DomainError> {
        Ok(voca_dr::Entity::find()
            .filter(voca_dr::Column::VocaIdx.eq(voca_idx))
            .order_by_asc(voca_dr::Column::Idx)
            .all(&self.txn)
            .await?)
    }

    async fn meanings_of_voca(
        &self,
        voca_idx: i32,
    ) -> Result<Vec<voca_meaning::Model>, DomainError> {
        Ok(voca_meaning::Entity::find()
            .filter(voca_meaning::Column::VocaIdx.eq(voca_idx))
            .order_by_asc(voca_meaning::Column::Idx)
            .all(&self.txn)
            .await?)
    }

    async fn examples_of_meaning(
        &self,
        meaning_idx: i32,
    ) -> Result<Vec<meaning_example::Model>, DomainError> {
        Ok(meaning_example::Entity::find()
            .filter(meaning_example::Column::MeaningIdx.eq(meaning_idx))
            .order_by_asc(meaning_example::Column::Idx)
            .all(&self.txn)
            .await?)
    }

    async fn snyants_of_meaning(
        &self,
        meaning_idx: i32,
    ) -> Result<Vec<meaning_snyant::Model>, DomainError> {
        Ok(meaning_snyant::Entity::find()
            .filter(meaning_snyant::Column::MeaningIdx.eq(meaning_idx))
            .order_by_asc(meaning_snyant::Column::Idx)
            .all(&self.txn)
            .await?)
    }

    async fn insert_book(&self, input: NewBook) -> Result<book::Model, DomainError> {
        Ok(book::ActiveModel::from(input).insert(&self.txn).await?)
    }

    async fn insert_chapter(&self, input: NewChapter) -> Result<chapter::Model, DomainError> {
        Ok(chapter::ActiveModel::from(input).insert(&self.txn).await?)
    }

    async fn insert_unit(&self, input: NewUnit) -> Result<unit::Model, DomainError> {
        Ok(unit::ActiveModel::from(input).insert(&self.txn).await?)
    }

    async fn insert_mapping(
        &self,
        input: NewChapterUnitMapping,
    ) -> Result<chapter_unit_mapping::Model, DomainError> {
        Ok(chapter_unit_mapping::ActiveModel::from(input)
            .insert(&self.txn)
            .await?)
    }

    async fn insert_voca(&self, input: NewVoca) -> Result<voca::Model, DomainError> {
        Ok(voca::ActiveModel::from(input).insert(&self.txn).await?)
    }

    async fn insert_derivative(&self, input: NewVocaDr) -> Result<voca_dr::Model, DomainError> {
        Ok(voca_dr::ActiveModel::from(input).insert(&self.txn).await?)
    }

    async fn insert_meaning(
        &self,
        input: NewVocaMeaning,
    ) -> Result<voca_meaning::Model, DomainError> {
        Ok(voca_meaning::ActiveModel::from(input)
            .insert(&self.txn)
            .await?)
    }

    async fn insert_example(
        &self,
        input: NewMeaningExample,
    ) -> Result<meaning_example::Model, DomainError> {
        Ok(meaning_example::ActiveModel::from(input)
            .insert(&self.txn)
            .await?)
    }

    async fn insert_snyant(
        &self,
        input: NewMeaningSnyant,
    ) -> Result<meaning_snyant::Model, DomainError> {
        Ok(meaning_snyant::ActiveModel::from(input)
            .insert(&self.txn)
            .await?)
    }

    async fn commit(self) -> Result<(), DomainError> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), DomainError> {
        self.txn.rollback().await?;
        Ok(())
    }
}
