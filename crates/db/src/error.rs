use thiserror::Error;

/// Why a book failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

/// Errors raised by a [`crate::BookStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration '{module}/{id}' failed: {source}")]
    Migration {
        module: String,
        id: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("store is closed")]
    Closed,

    #[error("unsupported database url '{0}'; expected memory:// or postgres://")]
    UnsupportedUrl(String),
}

impl StoreError {
    /// Whether the write was refused by schema validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
