use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

/// Table definitions, parents before children so foreign keys resolve.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS pt_category (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        cate_name TEXT NOT NULL,
        cate_lvl INTEGER NOT NULL,
        cate_pidx INTEGER REFERENCES pt_category(idx),
        created_at TEXT NOT NULL,
        created_by INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_voca_type (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        vt_title TEXT NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_book (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        book_title TEXT NOT NULL,
        book_isbn TEXT,
        book_imagelink TEXT,
        cate_lvl1_idx INTEGER REFERENCES pt_category(idx),
        cate_lvl2_idx INTEGER REFERENCES pt_category(idx),
        created_at TEXT NOT NULL,
        created_by INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_chapter (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        ch_title TEXT NOT NULL,
        ch_order INTEGER NOT NULL,
        book_idx INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER,
        FOREIGN KEY (book_idx) REFERENCES pt_book(idx) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_unit (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        un_title TEXT NOT NULL,
        un_order INTEGER NOT NULL,
        book_idx INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER,
        FOREIGN KEY (book_idx) REFERENCES pt_book(idx) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_ch_un_mapping (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        ch_idx INTEGER NOT NULL,
        un_idx INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER,
        FOREIGN KEY (ch_idx) REFERENCES pt_chapter(idx) ON DELETE CASCADE,
        FOREIGN KEY (un_idx) REFERENCES pt_unit(idx) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_voca (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        vc_word TEXT NOT NULL,
        vt_idx INTEGER NOT NULL,
        vc_type INTEGER NOT NULL,
        vc_root TEXT,
        vc_unikey TEXT,
        vc_mp3_link TEXT,
        vc_order INTEGER NOT NULL DEFAULT 0,
        un_idx INTEGER NOT NULL,
        book_idx INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER,
        FOREIGN KEY (vt_idx) REFERENCES pt_voca_type(idx),
        FOREIGN KEY (un_idx) REFERENCES pt_unit(idx) ON DELETE CASCADE,
        FOREIGN KEY (book_idx) REFERENCES pt_book(idx) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_voca_dr (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        dr_word TEXT NOT NULL,
        dr_meaning TEXT NOT NULL,
        voca_idx INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER,
        FOREIGN KEY (voca_idx) REFERENCES pt_voca(idx) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_voca_meaning (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        mi_meaning TEXT NOT NULL,
        mi_engmeaning TEXT,
        mi_order INTEGER NOT NULL,
        voca_idx INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER,
        FOREIGN KEY (voca_idx) REFERENCES pt_voca(idx) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_meaning_example (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        ex_sentence TEXT NOT NULL,
        ex_translation TEXT NOT NULL,
        meaning_idx INTEGER NOT NULL,
        voca_idx INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER,
        FOREIGN KEY (meaning_idx) REFERENCES pt_voca_meaning(idx) ON DELETE CASCADE,
        FOREIGN KEY (voca_idx) REFERENCES pt_voca(idx) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pt_meaning_snyant (
        idx INTEGER PRIMARY KEY AUTOINCREMENT,
        snyant_type INTEGER NOT NULL,
        snyant_word TEXT NOT NULL,
        snyant_meaning TEXT NOT NULL DEFAULT '',
        meaning_idx INTEGER NOT NULL,
        voca_idx INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        created_by INTEGER,
        FOREIGN KEY (meaning_idx) REFERENCES pt_voca_meaning(idx) ON DELETE CASCADE,
        FOREIGN KEY (voca_idx) REFERENCES pt_voca(idx) ON DELETE CASCADE
    )
    "#,
];

/// Indexes backing the owner lookups of the copy walk
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_chapter_book ON pt_chapter(book_idx)",
    "CREATE INDEX IF NOT EXISTS idx_unit_book ON pt_unit(book_idx)",
    "CREATE INDEX IF NOT EXISTS idx_mapping_chapter ON pt_ch_un_mapping(ch_idx)",
    "CREATE INDEX IF NOT EXISTS idx_voca_book ON pt_voca(book_idx)",
    "CREATE INDEX IF NOT EXISTS idx_voca_dr_voca ON pt_voca_dr(voca_idx)",
    "CREATE INDEX IF NOT EXISTS idx_meaning_voca ON pt_voca_meaning(voca_idx)",
    "CREATE INDEX IF NOT EXISTS idx_example_meaning ON pt_meaning_example(meaning_idx)",
    "CREATE INDEX IF NOT EXISTS idx_snyant_meaning ON pt_meaning_snyant(meaning_idx)",
];

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON".to_owned(),
    ))
    .await?;

    for ddl in SCHEMA.iter().chain(INDEXES) {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            ddl.to_string(),
        ))
        .await?;
    }

    tracing::debug!("Catalog schema ready ({} tables)", SCHEMA.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        run_migrations(&db).await.expect("Second migration run failed");

        let books = crate::models::book::Entity::find()
            .count(&db)
            .await
            .expect("pt_book missing");
        assert_eq!(books, 0);
    }
}
