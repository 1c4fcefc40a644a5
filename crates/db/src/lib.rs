//! Book record schema and persistence for the bookstore site.
//!
//! Handlers talk to an [`BookStore`] trait object created once at startup by
//! [`connect`] and closed on shutdown.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use bookstore_kernel::settings::DatabaseSettings;
use uuid::Uuid;

pub use error::{StoreError, ValidationError};
pub use memory::MemoryBookStore;
pub use models::{Book, BookDraft, BookField, BookFields, BookFilter, DEFAULT_IMAGE_URL};
pub use postgres::PgBookStore;
pub use store::BookStore;

/// Shared handle to the configured store.
pub type StoreHandle = Arc<dyn BookStore>;

/// Open the store named by `settings.url`.
pub async fn connect(settings: &DatabaseSettings) -> Result<StoreHandle, StoreError> {
    let url = settings.url.as_str();
    let scheme = url.split("://").next().unwrap_or_default();

    match scheme {
        "memory" => {
            tracing::info!(target: "bookstore-db", "using in-memory book store");
            Ok(Arc::new(MemoryBookStore::new()))
        }
        "postgres" | "postgresql" => {
            let store = PgBookStore::connect(url, settings.max_connections)
                .await
                .inspect_err(|error| {
                    tracing::error!(target: "bookstore-db", %error, "database connection failed");
                })?;
            tracing::info!(target: "bookstore-db", "connected to postgres book store");
            Ok(Arc::new(store))
        }
        _ => Err(StoreError::UnsupportedUrl(url.to_string())),
    }
}

/// Ids that do not parse are treated as unknown records.
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_url_opens_memory_store() {
        let settings = DatabaseSettings::default();
        let store = connect(&settings).await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let settings = DatabaseSettings {
            url: "mongodb://localhost:27017/bookstore".to_string(),
            ..DatabaseSettings::default()
        };
        let err = connect(&settings).await.err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedUrl(_)));
    }

    #[test]
    fn parse_id_accepts_padded_uuid() {
        let id = Uuid::now_v7();
        assert_eq!(parse_id(&format!(" {id} ")), Some(id));
        assert_eq!(parse_id("book-1"), None);
    }
}
