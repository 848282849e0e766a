//! In-process implementation of CatalogStore
//!
//! A unit of work reads the tables as they were when it began, plus its own
//! staged rows. `commit` appends the staged rows to the shared tables,
//! `rollback` or drop throws them away. Ids come from one sequence per table
//! shared by all units of work, so overlapping units never hand out the same
//! `idx`. Foreign keys are not checked.
//! Used to exercise the copy engine without SQLite, including injected
//! write failures.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{
    CatalogStore, CatalogTx, DomainError, NewBook, NewChapter, NewChapterUnitMapping,
    NewMeaningExample, NewMeaningSnyant, NewUnit, NewVoca, NewVocaDr, NewVocaMeaning,
};
use crate::models::{
    book, chapter, chapter_unit_mapping, meaning_example, meaning_snyant, unit, voca, voca_dr,
    voca_meaning,
};

/// Full contents of the catalog tables, rows kept in `idx` order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CatalogTables {
    pub books: Vec<book::Model>,
    pub chapters: Vec<chapter::Model>,
    pub units: Vec<unit::Model>,
    pub mappings: Vec<chapter_unit_mapping::Model>,
    pub vocas: Vec<voca::Model>,
    pub derivatives: Vec<voca_dr::Model>,
    pub meanings: Vec<voca_meaning::Model>,
    pub examples: Vec<meaning_example::Model>,
    pub snyants: Vec<meaning_snyant::Model>,
}

impl CatalogTables {
    pub fn row_count(&self) -> usize {
        self.books.len()
            + self.chapters.len()
            + self.units.len()
            + self.mappings.len()
            + self.vocas.len()
            + self.derivatives.len()
            + self.meanings.len()
            + self.examples.len()
            + self.snyants.len()
    }
}

const TABLES: usize = 9;

trait Row: Clone {
    /// Slot of this table's id sequence
    const SEQ: usize;

    fn idx(&self) -> i32;
    fn rows(tables: &CatalogTables) -> &Vec<Self>;
    fn rows_mut(tables: &mut CatalogTables) -> &mut Vec<Self>;
}

macro_rules! impl_row {
    ($($model:path => $seq:literal, $field:ident);* $(;)?) => {
        $(impl Row for $model {
            const SEQ: usize = $seq;

            fn idx(&self) -> i32 {
                self.idx
            }

            fn rows(tables: &CatalogTables) -> &Vec<Self> {
                &tables.$field
            }

            fn rows_mut(tables: &mut CatalogTables) -> &mut Vec<Self> {
                &mut tables.$field
            }
        })*

        fn max_ids(tables: &CatalogTables) -> [i32; TABLES] {
            let mut max = [0; TABLES];
            $(max[$seq] = tables.$field.iter().map(|r| r.idx).max().unwrap_or(0);)*
            max
        }

        fn merge(into: &mut CatalogTables, staged: &mut CatalogTables) {
            $(
                into.$field.append(&mut staged.$field);
                into.$field.sort_by_key(|r| r.idx);
            )*
        }
    };
}

impl_row!(
    book::Model => 0, books;
    chapter::Model => 1, chapters;
    unit::Model => 2, units;
    chapter_unit_mapping::Model => 3, mappings;
    voca::Model => 4, vocas;
    voca_dr::Model => 5, derivatives;
    voca_meaning::Model => 6, meanings;
    meaning_example::Model => 7, examples;
    meaning_snyant::Model => 8, snyants;
);

fn lock(tables: &Mutex<CatalogTables>) -> Result<MutexGuard<'_, CatalogTables>, DomainError> {
    tables
        .lock()
        .map_err(|_| DomainError::Internal("catalog tables lock poisoned".to_string()))
}

#[derive(Default)]
struct Shared {
    tables: Mutex<CatalogTables>,
    /// Last `idx` handed out, per table
    sequences: [AtomicI32; TABLES],
    fail_on_insert: Mutex<Option<usize>>,
}

/// Shared in-memory tables
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    shared: Arc<Shared>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw table contents, bypassing any consistency check
    pub fn from_tables(tables: CatalogTables) -> Self {
        let max = max_ids(&tables);
        Self {
            shared: Arc::new(Shared {
                tables: Mutex::new(tables),
                sequences: std::array::from_fn(|slot| AtomicI32::new(max[slot])),
                fail_on_insert: Mutex::default(),
            }),
        }
    }

    /// Make the `n`-th insert (1-based) of every unit of work opened from now
    /// on fail with a database error. `None` clears the fault.
    pub fn fail_on_insert(&self, n: Option<usize>) {
        if let Ok(mut slot) = self.shared.fail_on_insert.lock() {
            *slot = n;
        }
    }

    /// Committed contents
    pub fn snapshot(&self) -> Result<CatalogTables, DomainError> {
        Ok(lock(&self.shared.tables)?.clone())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    type Tx = InMemoryCatalogTx;

    async fn begin(&self) -> Result<InMemoryCatalogTx, DomainError> {
        let base = self.snapshot()?;
        let fail_on_insert = *self
            .shared
            .fail_on_insert
            .lock()
            .map_err(|_| DomainError::Internal("fault slot lock poisoned".to_string()))?;

        Ok(InMemoryCatalogTx {
            shared: Arc::clone(&self.shared),
            base,
            staged: Mutex::default(),
            inserts: AtomicUsize::new(0),
            fail_on_insert,
        })
    }

    async fn find_book(&self, idx: i32) -> Result<Option<book::Model>, DomainError> {
        Ok(lock(&self.shared.tables)?
            .books
            .iter()
            .find(|b| b.idx == idx)
            .cloned())
    }
}

pub struct InMemoryCatalogTx {
    shared: Arc<Shared>,
    /// Committed tables as of `begin`
    base: CatalogTables,
    /// Rows inserted by this unit of work
    staged: Mutex<CatalogTables>,
    inserts: AtomicUsize,
    fail_on_insert: Option<usize>,
}

impl InMemoryCatalogTx {
    fn select<R: Row>(&self, keep: impl Fn(&R) -> bool) -> Result<Vec<R>, DomainError> {
        let staged = lock(&self.staged)?;
        let mut rows: Vec<R> = R::rows(&self.base)
            .iter()
            .chain(R::rows(&staged).iter())
            .filter(|r| keep(r))
            .cloned()
            .collect();
        rows.sort_by_key(R::idx);
        Ok(rows)
    }

    fn insert<R: Row>(&self, build: impl FnOnce(i32, String) -> R) -> Result<R, DomainError> {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_insert == Some(n) {
            return Err(DomainError::Database(format!(
                "injected failure on insert #{}",
                n
            )));
        }

        let idx = self.shared.sequences[R::SEQ].fetch_add(1, Ordering::SeqCst) + 1;
        let row = build(idx, chrono::Utc::now().to_rfc3339());
        R::rows_mut(&mut *lock(&self.staged)?).push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl CatalogTx for InMemoryCatalogTx {
    async fn find_book(&self, idx: i32) -> Result<Option<book::Model>, DomainError> {
        Ok(self.select::<book::Model>(|b| b.idx == idx)?.pop())
    }

    async fn chapters_of_book(&self, book_idx: i32) -> Result<Vec<chapter::Model>, DomainError> {
        self.select::<chapter::Model>(|c| c.book_idx == book_idx)
    }

    async fn units_of_book(&self, book_idx: i32) -> Result<Vec<unit::Model>, DomainError> {
        self.select::<unit::Model>(|u| u.book_idx == book_idx)
    }

    async fn mappings_of_chapters(
        &self,
        ch_idxs: &[i32],
    ) -> Result<Vec<chapter_unit_mapping::Model>, DomainError> {
        self.select::<chapter_unit_mapping::Model>(|m| ch_idxs.contains(&m.ch_idx))
    }

    async fn vocas_of_book(&self, book_idx: i32) -> Result<Vec<voca::Model>, DomainError> {
        self.select::<voca::Model>(|v| v.book_idx == book_idx)
    }

    async fn derivatives_of_voca(
        &self,
        voca_idx: i32,
    ) -> Result<Vec<voca_dr::Model>, DomainError> {
        self.select::<voca_dr::Model>(|d| d.voca_idx == voca_idx)
    }

    async fn meanings_of_voca(
        &self,
        voca_idx: i32,
    ) -> Result<Vec<voca_meaning::Model>, DomainError> {
        self.select::<voca_meaning::Model>(|m| m.voca_idx == voca_idx)
    }

    async fn examples_of_meaning(
        &self,
        meaning_idx: i32,
    ) -> Result<Vec<meaning_example::Model>, DomainError> {
        self.select::<meaning_example::Model>(|e| e.meaning_idx == meaning_idx)
    }

    async fn snyants_of_meaning(
        &self,
        meaning_idx: i32,
    ) -> Result<Vec<meaning_snyant::Model>, DomainError> {
        self.select::<meaning_snyant::Model>(|s| s.meaning_idx == meaning_idx)
    }

    async fn insert_book(&self, input: NewBook) -> Result<book::Model, DomainError> {
        self.insert(
            |idx, created_at| book::Model {
                idx,
                book_title: input.book_title,
                book_isbn: input.book_isbn,
                book_imagelink: input.book_imagelink,
                cate_lvl1_idx: input.cate_lvl1_idx,
                cate_lvl2_idx: input.cate_lvl2_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn insert_chapter(&self, input: NewChapter) -> Result<chapter::Model, DomainError> {
        self.insert(
            |idx, created_at| chapter::Model {
                idx,
                ch_title: input.ch_title,
                ch_order: input.ch_order,
                book_idx: input.book_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn insert_unit(&self, input: NewUnit) -> Result<unit::Model, DomainError> {
        self.insert(
            |idx, created_at| unit::Model {
                idx,
                un_title: input.un_title,
                un_order: input.un_order,
                book_idx: input.book_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn insert_mapping(
        &self,
        input: NewChapterUnitMapping,
    ) -> Result<chapter_unit_mapping::Model, DomainError> {
        self.insert(
            |idx, created_at| chapter_unit_mapping::Model {
                idx,
                ch_idx: input.ch_idx,
                un_idx: input.un_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn insert_voca(&self, input: NewVoca) -> Result<voca::Model, DomainError> {
        self.insert(
            |idx, created_at| voca::Model {
                idx,
                vc_word: input.vc_word,
                vt_idx: input.vt_idx,
                vc_type: input.vc_type,
                vc_root: input.vc_root,
                vc_unikey: input.vc_unikey,
                vc_mp3_link: input.vc_mp3_link,
                vc_order: input.vc_order,
                un_idx: input.un_idx,
                book_idx: input.book_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn insert_derivative(&self, input: NewVocaDr) -> Result<voca_dr::Model, DomainError> {
        self.insert(
            |idx, created_at| voca_dr::Model {
                idx,
                dr_word: input.dr_word,
                dr_meaning: input.dr_meaning,
                voca_idx: input.voca_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn insert_meaning(
        &self,
        input: NewVocaMeaning,
    ) -> Result<voca_meaning::Model, DomainError> {
        self.insert(
            |idx, created_at| voca_meaning::Model {
                idx,
                mi_meaning: input.mi_meaning,
                mi_engmeaning: input.mi_engmeaning,
                mi_order: input.mi_order,
                voca_idx: input.voca_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn insert_example(
        &self,
        input: NewMeaningExample,
    ) -> Result<meaning_example::Model, DomainError> {
        self.insert(
            |idx, created_at| meaning_example::Model {
                idx,
                ex_sentence: input.ex_sentence,
                ex_translation: input.ex_translation,
                meaning_idx: input.meaning_idx,
                voca_idx: input.voca_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn insert_snyant(
        &self,
        input: NewMeaningSnyant,
    ) -> Result<meaning_snyant::Model, DomainError> {
        self.insert(
            |idx, created_at| meaning_snyant::Model {
                idx,
                snyant_type: input.snyant_type,
                snyant_word: input.snyant_word,
                snyant_meaning: input.snyant_meaning,
                meaning_idx: input.meaning_idx,
                voca_idx: input.voca_idx,
                created_at,
                created_by: input.created_by,
            },
        )
    }

    async fn commit(self) -> Result<(), DomainError> {
        let mut staged = self
            .staged
            .into_inner()
            .map_err(|_| DomainError::Internal("staged rows lock poisoned".to_string()))?;
        merge(&mut *lock(&self.shared.tables)?, &mut staged);
        Ok(())
    }

    async fn rollback(self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            book_title: title.to_string(),
            book_isbn: None,
            book_imagelink: None,
            cate_lvl1_idx: None,
            cate_lvl2_idx: None,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_uncommitted_writes_are_discarded() {
        let store = InMemoryCatalogStore::new();

        let tx = store.begin().await.unwrap();
        let book = tx.insert_book(new_book("Draft")).await.unwrap();
        assert!(tx.find_book(book.idx).await.unwrap().is_some());
        drop(tx);

        assert_eq!(store.snapshot().unwrap().row_count(), 0);
        assert!(store.find_book(book.idx).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_publishes_and_rollback_discards() {
        let store = InMemoryCatalogStore::new();

        let tx = store.begin().await.unwrap();
        let kept = tx.insert_book(new_book("Kept")).await.unwrap();
        tx.commit().await.unwrap();

        let tx = store.begin().await.unwrap();
        tx.insert_book(new_book("Dropped")).await.unwrap();
        tx.rollback().await.unwrap();

        let tables = store.snapshot().unwrap();
        assert_eq!(tables.books.len(), 1);
        assert_eq!(tables.books[0].idx, kept.idx);
    }

    #[tokio::test]
    async fn test_injected_failure_hits_requested_insert() {
        let store = InMemoryCatalogStore::new();
        store.fail_on_insert(Some(2));

        let tx = store.begin().await.unwrap();
        assert!(tx.insert_book(new_book("first")).await.is_ok());
        let err = tx.insert_book(new_book("second")).await.unwrap_err();
        assert!(matches!(err, DomainError::Database(_)));
    }

    #[tokio::test]
    async fn test_overlapping_units_of_work_keep_both_commits() {
        let store = InMemoryCatalogStore::new();

        let a = store.begin().await.unwrap();
        let b = store.begin().await.unwrap();
        let book_a = a.insert_book(new_book("A")).await.unwrap();
        let book_b = b.insert_book(new_book("B")).await.unwrap();
        assert_ne!(book_a.idx, book_b.idx);

        // Neither sees the other's staged row
        assert!(b.find_book(book_a.idx).await.unwrap().is_none());
        assert!(a.find_book(book_b.idx).await.unwrap().is_none());

        a.commit().await.unwrap();
        b.commit().await.unwrap();

        let titles: Vec<(i32, String)> = store
            .snapshot()
            .unwrap()
            .books
            .into_iter()
            .map(|b| (b.idx, b.book_title))
            .collect();
        assert_eq!(
            titles,
            vec![(book_a.idx, "A".to_string()), (book_b.idx, "B".to_string())]
        );
    }

    #[tokio::test]
    async fn test_ids_continue_after_seeded_rows() {
        let mut tables = CatalogTables::default();
        let tx = InMemoryCatalogStore::new().begin().await.unwrap();
        let seeded = tx.insert_book(new_book("seeded")).await.unwrap();
        tables.books.push(book::Model {
            idx: 41,
            ..seeded
        });

        let store = InMemoryCatalogStore::from_tables(tables);
        let tx = store.begin().await.unwrap();
        let next = tx.insert_book(new_book("next")).await.unwrap();
        assert_eq!(next.idx, 42);
    }

    #[tokio::test]
    async fn test_ids_increase_per_table() {
        let store = InMemoryCatalogStore::new();
        let tx = store.begin().await.unwrap();
        let a = tx.insert_book(new_book("a")).await.unwrap();
        let b = tx.insert_book(new_book("b")).await.unwrap();
        assert!(b.idx > a.idx);
    }
}
