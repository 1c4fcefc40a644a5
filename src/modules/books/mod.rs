pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_db::StoreHandle;
use bookstore_http::Views;
use bookstore_kernel::{InitCtx, Migration, Module};

/// Shared by every book route
#[derive(Clone)]
pub struct BooksState {
    pub store: StoreHandle,
    pub views: Views,
}

/// Catalog pages: listing, search, categories and the add/edit/delete flow
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(store: StoreHandle, views: Views) -> Self {
        Self {
            state: BooksState { store, views },
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_books",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    id          UUID PRIMARY KEY,
                    title       TEXT NOT NULL CHECK (btrim(title) <> ''),
                    author      TEXT NOT NULL CHECK (btrim(author) <> ''),
                    isbn        TEXT NOT NULL CHECK (btrim(isbn) <> ''),
                    price       DOUBLE PRECISION NOT NULL CHECK (price >= 0),
                    category    TEXT NOT NULL CHECK (btrim(category) <> ''),
                    description TEXT NOT NULL CHECK (btrim(description) <> ''),
                    stock       BIGINT NOT NULL CHECK (stock >= 0),
                    image_url   TEXT NOT NULL,
                    created_at  TIMESTAMPTZ NOT NULL,
                    updated_at  TIMESTAMPTZ NOT NULL
                );
                CREATE INDEX IF NOT EXISTS books_category_idx ON books (category);
                CREATE INDEX IF NOT EXISTS books_created_at_idx ON books (created_at DESC);
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module over a shared store
pub fn create_module(store: StoreHandle, views: Views) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store, views))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_db::MemoryBookStore;

    #[test]
    fn ships_books_table_migration() {
        let views = crate::views::load().unwrap();
        let module = BooksModule::new(Arc::new(MemoryBookStore::new()), views);

        let migrations = module.migrations();
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].id, "001_books");
        assert!(migrations[0].up.contains("CREATE TABLE IF NOT EXISTS books"));
    }
}
