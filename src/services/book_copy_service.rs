//! Book Copy Service - duplicates a book and everything it owns
//!
//! The whole walk runs inside one unit of work of a [`CatalogStore`]: either
//! every duplicated row is committed or none is. Rows are created parents
//! first, so each foreign key of a duplicate is resolved through the
//! [`IdRemapper`] to a row created earlier in the same copy.

use serde::Serialize;
use std::time::Duration;

use crate::domain::{
    CatalogStore, CatalogTx, DomainError, NewBook, NewChapter, NewChapterUnitMapping,
    NewMeaningExample, NewMeaningSnyant, NewUnit, NewVoca, NewVocaDr, NewVocaMeaning,
};
use crate::models::book;
use crate::services::id_remapper::{EntityKind, IdRemapper};

/// Rows created by one book copy, and rows left behind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopySummary {
    pub chapters: usize,
    pub units: usize,
    pub mappings: usize,
    pub vocas: usize,
    pub derivatives: usize,
    pub meanings: usize,
    pub examples: usize,
    pub snyants: usize,
    /// Chapter/unit mappings whose chapter or unit was not copied
    pub skipped_mappings: usize,
    /// Vocabulary entries (with their whole subtree) whose unit was not copied
    pub skipped_vocas: usize,
}

impl CopySummary {
    /// Rows written, book included
    pub fn rows_created(&self) -> usize {
        1 + self.chapters
            + self.units
            + self.mappings
            + self.vocas
            + self.derivatives
            + self.meanings
            + self.examples
            + self.snyants
    }

    pub fn is_partial(&self) -> bool {
        self.skipped_mappings > 0 || self.skipped_vocas > 0
    }
}

/// Result of a committed book copy
#[derive(Debug, Clone, Serialize)]
pub struct BookCopy {
    pub source_idx: i32,
    pub book: book::Model,
    pub summary: CopySummary,
}

/// Copy a book with its chapters, units, chapter/unit mappings, vocabulary
/// entries and their derivatives, meanings, examples and synonyms/antonyms.
///
/// The new book's title gets `title_suffix` appended. Category references,
/// vocabulary types and `created_by` are carried over unchanged.
///
/// Returns `DomainError::NotFound` when `source_book_idx` does not exist.
/// Any failure rolls back every row written by this call.
pub async fn copy_book_and_dependents<S: CatalogStore>(
    store: &S,
    source_book_idx: i32,
    title_suffix: &str,
) -> Result<BookCopy, DomainError> {
    copy_book(store, source_book_idx, title_suffix, None).await
}

/// [`copy_book_and_dependents`] with `deadline` bounding the walk over the
/// source book. A walk that runs past it is rolled back and reported as
/// `DomainError::Internal`. Commit and the final re-read are not bounded, so
/// a copy that reached commit is never reported as failed.
pub async fn copy_book_and_dependents_within<S: CatalogStore>(
    store: &S,
    source_book_idx: i32,
    title_suffix: &str,
    deadline: Duration,
) -> Result<BookCopy, DomainError> {
    copy_book(store, source_book_idx, title_suffix, Some(deadline)).await
}

async fn copy_book<S: CatalogStore>(
    store: &S,
    source_book_idx: i32,
    title_suffix: &str,
    deadline: Option<Duration>,
) -> Result<BookCopy, DomainError> {
    tracing::info!("Copying book {} and its dependents", source_book_idx);

    let tx = store.begin().await?;

    let walk = SubgraphCloner::new(&tx).run(source_book_idx, title_suffix);
    let outcome = match deadline {
        Some(limit) => tokio::time::timeout(limit, walk).await.unwrap_or_else(|_| {
            Err(DomainError::Internal(format!(
                "copy walk exceeded {:?}",
                limit
            )))
        }),
        None => walk.await,
    };

    let (new_book_idx, summary) = match outcome {
        Ok(done) => done,
        Err(e) => {
            match &e {
                DomainError::NotFound => {
                    tracing::info!("Book {} not found, nothing copied", source_book_idx)
                }
                other => tracing::error!(
                    "Copy of book {} failed, rolling back: {}",
                    source_book_idx,
                    other
                ),
            }
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    "Rollback of book {} copy failed: {}",
                    source_book_idx,
                    rollback_err
                );
            }
            return Err(e);
        }
    };

    tx.commit().await?;

    if summary.is_partial() {
        tracing::warn!(
            "Book {} copied as {} with {} mapping(s) and {} voca(s) skipped",
            source_book_idx,
            new_book_idx,
            summary.skipped_mappings,
            summary.skipped_vocas
        );
    }
    tracing::info!(
        "Book {} copied as {} ({} rows)",
        source_book_idx,
        new_book_idx,
        summary.rows_created()
    );

    let book = store.find_book(new_book_idx).await?.ok_or_else(|| {
        DomainError::Internal(format!("book {} missing after commit", new_book_idx))
    })?;

    Ok(BookCopy {
        source_idx: source_book_idx,
        book,
        summary,
    })
}

/// Walks one source book inside an open unit of work. Does not commit.
struct SubgraphCloner<'a, T: CatalogTx> {
    tx: &'a T,
    remap: IdRemapper,
    /// (original meaning, new meaning, new owning voca)
    meanings: Vec<(i32, i32, i32)>,
    summary: CopySummary,
}

impl<'a, T: CatalogTx> SubgraphCloner<'a, T> {
    fn new(tx: &'a T) -> Self {
        Self {
            tx,
            remap: IdRemapper::new(),
            meanings: Vec::new(),
            summary: CopySummary::default(),
        }
    }

    async fn run(
        mut self,
        source_book_idx: i32,
        title_suffix: &str,
    ) -> Result<(i32, CopySummary), DomainError> {
        let source = self
            .tx
            .find_book(source_book_idx)
            .await?
            .ok_or(DomainError::NotFound)?;

        let new_book_idx = self.clone_book(&source, title_suffix).await?;
        self.clone_chapters(source.idx, new_book_idx).await?;
        self.clone_units(source.idx, new_book_idx).await?;
        self.clone_mappings().await?;

        let vocas = self.clone_vocas(source.idx, new_book_idx).await?;
        self.clone_derivatives(&vocas).await?;
        self.clone_meanings(&vocas).await?;
        self.clone_meaning_children().await?;

        Ok((new_book_idx, self.summary))
    }

    async fn clone_book(
        &mut self,
        source: &book::Model,
        title_suffix: &str,
    ) -> Result<i32, DomainError> {
        let copy = self
            .tx
            .insert_book(NewBook {
                book_title: format!("{}{}", source.book_title, title_suffix),
                book_isbn: source.book_isbn.clone(),
                book_imagelink: source.book_imagelink.clone(),
                cate_lvl1_idx: source.cate_lvl1_idx,
                cate_lvl2_idx: source.cate_lvl2_idx,
                created_by: source.created_by,
            })
            .await?;
        self.remap.record(EntityKind::Book, source.idx, copy.idx)?;
        Ok(copy.idx)
    }

    async fn clone_chapters(&mut self, source_book: i32, new_book: i32) -> Result<(), DomainError> {
        for ch in self.tx.chapters_of_book(source_book).await? {
            let copy = self
                .tx
                .insert_chapter(NewChapter {
                    ch_title: ch.ch_title,
                    ch_order: ch.ch_order,
                    book_idx: new_book,
                    created_by: ch.created_by,
                })
                .await?;
            self.remap.record(EntityKind::Chapter, ch.idx, copy.idx)?;
            self.summary.chapters += 1;
        }
        tracing::debug!("Copied {} chapter(s)", self.summary.chapters);
        Ok(())
    }

    async fn clone_units(&mut self, source_book: i32, new_book: i32) -> Result<(), DomainError> {
        for un in self.tx.units_of_book(source_book).await? {
            let copy = self
                .tx
                .insert_unit(NewUnit {
                    un_title: un.un_title,
                    un_order: un.un_order,
                    book_idx: new_book,
                    created_by: un.created_by,
                })
                .await?;
            self.remap.record(EntityKind::Unit, un.idx, copy.idx)?;
            self.summary.units += 1;
        }
        tracing::debug!("Copied {} unit(s)", self.summary.units);
        Ok(())
    }

    /// Recreate each mapping whose chapter and unit were both copied
    async fn clone_mappings(&mut self) -> Result<(), DomainError> {
        let chapter_idxs = self.remap.originals(EntityKind::Chapter);

        for m in self.tx.mappings_of_chapters(&chapter_idxs).await? {
            let ch_idx = self.remap.resolve(EntityKind::Chapter, m.ch_idx);
            let un_idx = self.remap.resolve(EntityKind::Unit, m.un_idx);

            let (Some(ch_idx), Some(un_idx)) = (ch_idx, un_idx) else {
                tracing::warn!(
                    "Skipping mapping {} (chapter {} / unit {}): endpoint not copied",
                    m.idx,
                    m.ch_idx,
                    m.un_idx
                );
                self.summary.skipped_mappings += 1;
                continue;
            };

            self.tx
                .insert_mapping(NewChapterUnitMapping {
                    ch_idx,
                    un_idx,
                    created_by: m.created_by,
                })
                .await?;
            self.summary.mappings += 1;
        }
        tracing::debug!("Copied {} mapping(s)", self.summary.mappings);
        Ok(())
    }

    /// Returns (original voca, new voca) for every voca copied
    async fn clone_vocas(
        &mut self,
        source_book: i32,
        new_book: i32,
    ) -> Result<Vec<(i32, i32)>, DomainError> {
        let mut cloned = Vec::new();

        for voca in self.tx.vocas_of_book(source_book).await? {
            let Some(un_idx) = self.remap.resolve(EntityKind::Unit, voca.un_idx) else {
                tracing::warn!(
                    "Skipping voca {} ({}): unit {} was not copied",
                    voca.idx,
                    voca.vc_word,
                    voca.un_idx
                );
                self.summary.skipped_vocas += 1;
                continue;
            };

            let copy = self
                .tx
                .insert_voca(NewVoca {
                    vc_word: voca.vc_word,
                    vt_idx: voca.vt_idx,
                    vc_type: voca.vc_type,
                    vc_root: voca.vc_root,
                    vc_unikey: voca.vc_unikey,
                    vc_mp3_link: voca.vc_mp3_link,
                    vc_order: voca.vc_order,
                    un_idx,
                    book_idx: new_book,
                    created_by: voca.created_by,
                })
                .await?;
            self.remap.record(EntityKind::Voca, voca.idx, copy.idx)?;
            self.summary.vocas += 1;
            cloned.push((voca.idx, copy.idx));
        }
        tracing::debug!("Copied {} voca(s)", self.summary.vocas);
        Ok(cloned)
    }

    async fn clone_derivatives(&mut self, vocas: &[(i32, i32)]) -> Result<(), DomainError> {
        for &(old_voca, new_voca) in vocas {
            for dr in self.tx.derivatives_of_voca(old_voca).await? {
                self.tx
                    .insert_derivative(NewVocaDr {
                        dr_word: dr.dr_word,
                        dr_meaning: dr.dr_meaning,
                        voca_idx: new_voca,
                        created_by: dr.created_by,
                    })
                    .await?;
                self.summary.derivatives += 1;
            }
        }
        Ok(())
    }

    async fn clone_meanings(&mut self, vocas: &[(i32, i32)]) -> Result<(), DomainError> {
        for &(old_voca, new_voca) in vocas {
            for meaning in self.tx.meanings_of_voca(old_voca).await? {
                let copy = self
                    .tx
                    .insert_meaning(NewVocaMeaning {
                        mi_meaning: meaning.mi_meaning,
                        mi_engmeaning: meaning.mi_engmeaning,
                        mi_order: meaning.mi_order,
                        voca_idx: new_voca,
                        created_by: meaning.created_by,
                    })
                    .await?;
                self.remap
                    .record(EntityKind::Meaning, meaning.idx, copy.idx)?;
                self.meanings.push((meaning.idx, copy.idx, new_voca));
                self.summary.meanings += 1;
            }
        }
        tracing::debug!("Copied {} meaning(s)", self.summary.meanings);
        Ok(())
    }

    /// Examples and synonyms/antonyms point at both the meaning and its voca;
    /// both references move to the copies.
    async fn clone_meaning_children(&mut self) -> Result<(), DomainError> {
        let meanings = std::mem::take(&mut self.meanings);

        for (old_meaning, new_meaning, new_voca) in meanings {
            for ex in self.tx.examples_of_meaning(old_meaning).await? {
                self.tx
                    .insert_example(NewMeaningExample {
                        ex_sentence: ex.ex_sentence,
                        ex_translation: ex.ex_translation,
                        meaning_idx: new_meaning,
                        voca_idx: new_voca,
                        created_by: ex.created_by,
                    })
                    .await?;
                self.summary.examples += 1;
            }

            for sa in self.tx.snyants_of_meaning(old_meaning).await? {
                self.tx
                    .insert_snyant(NewMeaningSnyant {
                        snyant_type: sa.snyant_type,
                        snyant_word: sa.snyant_word,
                        snyant_meaning: sa.snyant_meaning,
                        meaning_idx: new_meaning,
                        voca_idx: new_voca,
                        created_by: sa.created_by,
                    })
                    .await?;
                self.summary.snyants += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryCatalogStore;
    use crate::infrastructure::seed::{DemoBook, DemoRefs, seed_demo_book};
    use std::collections::HashSet;

    const SUFFIX: &str = " (copy)";

    fn refs() -> DemoRefs {
        DemoRefs {
            cate_lvl1_idx: Some(1),
            cate_lvl2_idx: Some(2),
            vt_idx: 5,
            created_by: Some(7),
        }
    }

    async fn seeded() -> (InMemoryCatalogStore, DemoBook) {
        let store = InMemoryCatalogStore::new();
        let demo = seed_demo_book(&store, refs()).await.unwrap();
        (store, demo)
    }

    #[tokio::test]
    async fn test_copy_rebuilds_whole_subgraph_on_new_ids() {
        let (store, demo) = seeded().await;

        let copy = copy_book_and_dependents(&store, demo.book, SUFFIX)
            .await
            .unwrap();
        let t = store.snapshot().unwrap();
        let new_book = copy.book.idx;

        assert_ne!(new_book, demo.book);
        assert_eq!(copy.book.book_title, "Essential Words 1 (copy)");
        assert_eq!(copy.book.cate_lvl1_idx, Some(1));
        assert_eq!(copy.book.cate_lvl2_idx, Some(2));
        assert_eq!(copy.book.created_by, Some(7));
        assert_eq!(copy.summary.rows_created(), DemoBook::ROWS);
        assert!(!copy.summary.is_partial());
        assert_eq!(t.row_count(), 2 * DemoBook::ROWS);

        let chapters: Vec<_> = t.chapters.iter().filter(|c| c.book_idx == new_book).collect();
        let units: Vec<_> = t.units.iter().filter(|u| u.book_idx == new_book).collect();
        assert_eq!(chapters.len(), 2);
        assert_eq!(units.len(), 2);
        for c in &chapters {
            assert!(!demo.chapters.contains(&c.idx));
        }
        for u in &units {
            assert!(!demo.units.contains(&u.idx));
        }

        let ch1 = chapters.iter().find(|c| c.ch_order == 1).unwrap();
        let un1 = units.iter().find(|u| u.un_order == 1).unwrap();

        let new_mappings: Vec<_> = t
            .mappings
            .iter()
            .filter(|m| m.idx != demo.mapping)
            .collect();
        assert_eq!(new_mappings.len(), 1);
        assert_eq!(new_mappings[0].ch_idx, ch1.idx);
        assert_eq!(new_mappings[0].un_idx, un1.idx);

        let voca = t.vocas.iter().find(|v| v.book_idx == new_book).unwrap();
        assert_ne!(voca.idx, demo.voca);
        assert_eq!(voca.un_idx, un1.idx);
        assert_eq!(voca.vt_idx, 5);
        assert_eq!(voca.vc_word, "abandon");

        let dr = t.derivatives.iter().find(|d| d.idx != demo.derivative).unwrap();
        assert_eq!(dr.voca_idx, voca.idx);

        let meaning = t.meanings.iter().find(|m| m.idx != demo.meaning).unwrap();
        assert_eq!(meaning.voca_idx, voca.idx);

        // Both references of the leaf rows move to the copies
        let ex = t.examples.iter().find(|e| e.idx != demo.example).unwrap();
        assert_eq!(ex.meaning_idx, meaning.idx);
        assert_eq!(ex.voca_idx, voca.idx);
        let sa = t.snyants.iter().find(|s| s.idx != demo.snyant).unwrap();
        assert_eq!(sa.meaning_idx, meaning.idx);
        assert_eq!(sa.voca_idx, voca.idx);
        assert_eq!(sa.snyant_meaning, "to leave");
    }

    #[tokio::test]
    async fn test_copy_of_missing_book_is_not_found() {
        let (store, _) = seeded().await;
        let before = store.snapshot().unwrap();

        let err = copy_book_and_dependents(&store, 999, SUFFIX)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound));
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn test_failure_at_any_write_leaves_store_unchanged() {
        for n in 1..=DemoBook::ROWS {
            let (store, demo) = seeded().await;
            let before = store.snapshot().unwrap();
            store.fail_on_insert(Some(n));

            let err = copy_book_and_dependents(&store, demo.book, SUFFIX)
                .await
                .unwrap_err();

            assert!(matches!(err, DomainError::Database(_)), "insert #{}", n);
            assert_eq!(store.snapshot().unwrap(), before, "insert #{}", n);
        }
    }

    #[tokio::test]
    async fn test_repeated_copies_share_shape_not_ids() {
        let (store, demo) = seeded().await;

        let first = copy_book_and_dependents(&store, demo.book, SUFFIX)
            .await
            .unwrap();
        let second = copy_book_and_dependents(&store, demo.book, SUFFIX)
            .await
            .unwrap();
        assert_eq!(first.summary, second.summary);

        let t = store.snapshot().unwrap();
        let owned_by = |book: i32| -> HashSet<(&'static str, i32)> {
            let vocas: HashSet<i32> = t
                .vocas
                .iter()
                .filter(|v| v.book_idx == book)
                .map(|v| v.idx)
                .collect();
            let meanings: HashSet<i32> = t
                .meanings
                .iter()
                .filter(|m| vocas.contains(&m.voca_idx))
                .map(|m| m.idx)
                .collect();

            let mut rows = HashSet::new();
            rows.insert(("book", book));
            rows.extend(
                t.chapters
                    .iter()
                    .filter(|c| c.book_idx == book)
                    .map(|c| ("chapter", c.idx)),
            );
            rows.extend(
                t.units
                    .iter()
                    .filter(|u| u.book_idx == book)
                    .map(|u| ("unit", u.idx)),
            );
            rows.extend(vocas.iter().map(|&v| ("voca", v)));
            rows.extend(meanings.iter().map(|&m| ("meaning", m)));
            rows.extend(
                t.examples
                    .iter()
                    .filter(|e| meanings.contains(&e.meaning_idx))
                    .map(|e| ("example", e.idx)),
            );
            rows
        };

        let original = owned_by(demo.book);
        let a = owned_by(first.book.idx);
        let b = owned_by(second.book.idx);

        assert_eq!(a.len(), original.len());
        assert_eq!(b.len(), original.len());
        assert!(a.is_disjoint(&b));
        assert!(a.is_disjoint(&original));
        assert!(b.is_disjoint(&original));
    }

    #[tokio::test]
    async fn test_mapping_to_foreign_unit_is_dropped() {
        let (store, a) = seeded().await;
        let b = seed_demo_book(&store, refs()).await.unwrap();

        let tx = store.begin().await.unwrap();
        tx.insert_mapping(NewChapterUnitMapping {
            ch_idx: a.chapters[1],
            un_idx: b.units[0],
            created_by: None,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let copy = copy_book_and_dependents(&store, a.book, SUFFIX)
            .await
            .unwrap();

        assert_eq!(copy.summary.mappings, 1);
        assert_eq!(copy.summary.skipped_mappings, 1);
        assert!(copy.summary.is_partial());

        let t = store.snapshot().unwrap();
        let new_chapters: HashSet<i32> = t
            .chapters
            .iter()
            .filter(|c| c.book_idx == copy.book.idx)
            .map(|c| c.idx)
            .collect();
        let new_mappings: Vec<_> = t
            .mappings
            .iter()
            .filter(|m| new_chapters.contains(&m.ch_idx))
            .collect();
        assert_eq!(new_mappings.len(), 1);
        assert!(!b.units.contains(&new_mappings[0].un_idx));
    }

    #[tokio::test]
    async fn test_voca_in_foreign_unit_is_skipped_with_subtree() {
        let (store, a) = seeded().await;
        let b = seed_demo_book(&store, refs()).await.unwrap();

        let tx = store.begin().await.unwrap();
        let stray = tx
            .insert_voca(NewVoca {
                vc_word: "stray".to_string(),
                vt_idx: 5,
                vc_type: 1,
                vc_root: None,
                vc_unikey: None,
                vc_mp3_link: None,
                vc_order: 2,
                un_idx: b.units[0],
                book_idx: a.book,
                created_by: None,
            })
            .await
            .unwrap();
        tx.insert_meaning(NewVocaMeaning {
            mi_meaning: "길 잃은".to_string(),
            mi_engmeaning: None,
            mi_order: 1,
            voca_idx: stray.idx,
            created_by: None,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let copy = copy_book_and_dependents(&store, a.book, SUFFIX)
            .await
            .unwrap();

        assert_eq!(copy.summary.vocas, 1);
        assert_eq!(copy.summary.skipped_vocas, 1);
        assert_eq!(copy.summary.meanings, 1);

        let t = store.snapshot().unwrap();
        assert_eq!(t.vocas.iter().filter(|v| v.vc_word == "stray").count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_source_row_is_integrity_error() {
        let (seed_store, demo) = seeded().await;
        let mut tables = seed_store.snapshot().unwrap();
        let twin = tables.chapters[0].clone();
        tables.chapters.push(twin);

        let store = InMemoryCatalogStore::from_tables(tables.clone());
        let err = copy_book_and_dependents(&store, demo.book, SUFFIX)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Integrity(_)));
        assert_eq!(store.snapshot().unwrap(), tables);
    }
}
