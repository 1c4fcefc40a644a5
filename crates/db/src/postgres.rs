//! PostgreSQL backend.
//!
//! Books live in the `books` table created by the books module migration.
//! Applied migrations are tracked per module in `schema_migrations`.

use async_trait::async_trait;
use bookstore_kernel::Migration;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use crate::error::StoreError;
use crate::models::{Book, BookDraft, BookField, BookFilter};
use crate::parse_id;
use crate::store::BookStore;

const BOOK_COLUMNS: &str = "id, title, author, isbn, price, category, description, stock, \
                            image_url, created_at, updated_at";

/// Book store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.pool.is_closed() {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn insert(&self, draft: BookDraft) -> Result<Book, StoreError> {
        self.ensure_open()?;
        let fields = draft.validate()?;
        let book = Book::create(fields, Utc::now());

        let sql = format!(
            "INSERT INTO books ({BOOK_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {BOOK_COLUMNS}"
        );
        let stored = sqlx::query_as::<_, Book>(&sql)
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(book.price)
            .bind(&book.category)
            .bind(&book.description)
            .bind(book.stock)
            .bind(&book.image_url)
            .bind(book.created_at)
            .bind(book.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        self.ensure_open()?;
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY created_at DESC");
        Ok(sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, StoreError> {
        self.ensure_open()?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");
        Ok(sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        draft: BookDraft,
    ) -> Result<Option<Book>, StoreError> {
        self.ensure_open()?;
        let fields = draft.validate()?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let sql = format!(
            "UPDATE books SET title = $2, author = $3, isbn = $4, price = $5, category = $6, \
             description = $7, stock = $8, image_url = $9, updated_at = $10 \
             WHERE id = $1 RETURNING {BOOK_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .bind(fields.title)
            .bind(fields.author)
            .bind(fields.isbn)
            .bind(fields.price)
            .bind(fields.category)
            .bind(fields.description)
            .bind(fields.stock)
            .bind(fields.image_url)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Book>, StoreError> {
        self.ensure_open()?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let sql = format!("DELETE FROM books WHERE id = $1 RETURNING {BOOK_COLUMNS}");
        Ok(sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn distinct(&self, field: BookField) -> Result<Vec<String>, StoreError> {
        self.ensure_open()?;
        let sql = format!(
            "SELECT DISTINCT {column} COLLATE \"C\" AS value FROM books ORDER BY value",
            column = field.column()
        );
        Ok(sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_where(
        &self,
        filter: &BookFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Book>, StoreError> {
        self.ensure_open()?;
        // LIMIT NULL returns every row.
        let limit = limit.map(|limit| limit as i64);

        let books = match filter {
            BookFilter::Category(category) => {
                let sql = format!(
                    "SELECT {BOOK_COLUMNS} FROM books WHERE category = $1 \
                     ORDER BY created_at DESC LIMIT $2"
                );
                sqlx::query_as::<_, Book>(&sql)
                    .bind(category)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
            BookFilter::Search(query) => {
                let sql = format!(
                    "SELECT {BOOK_COLUMNS} FROM books \
                     WHERE strpos(lower(title), lower($1)) > 0 \
                        OR strpos(lower(author), lower($1)) > 0 \
                        OR strpos(lower(category), lower($1)) > 0 \
                     ORDER BY created_at DESC LIMIT $2"
                );
                sqlx::query_as::<_, Book>(&sql)
                    .bind(query)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(books)
    }

    async fn migrate(&self, migrations: &[(String, Migration)]) -> Result<usize, StoreError> {
        self.ensure_open()?;
        run_migrations(&self.pool, migrations).await
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("postgres book store closed");
    }
}

/// Apply every migration not yet recorded in `schema_migrations`.
pub async fn run_migrations(
    pool: &PgPool,
    migrations: &[(String, Migration)],
) -> Result<usize, StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            module     TEXT        NOT NULL,
            id         TEXT        NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            PRIMARY KEY (module, id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let done: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM schema_migrations WHERE module = $1 AND id = $2)",
        )
        .bind(module)
        .bind(migration.id)
        .fetch_one(pool)
        .await?;

        if done {
            tracing::debug!(module = %module, migration = migration.id, "migration already applied");
            continue;
        }

        let failed = |source: sqlx::Error| StoreError::Migration {
            module: module.clone(),
            id: migration.id.to_string(),
            source,
        };

        let mut tx = pool.begin().await?;
        (&mut *tx)
            .execute(sqlx::raw_sql(migration.up))
            .await
            .map_err(failed)?;
        sqlx::query("INSERT INTO schema_migrations (module, id) VALUES ($1, $2)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;
        tx.commit().await?;

        tracing::info!(module = %module, migration = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
