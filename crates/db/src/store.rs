//! Persistence interface for book records.
//!
//! Every backend validates a [`BookDraft`] before writing it, so a record
//! that breaks the schema never reaches storage. Lookups by an id that is not
//! a valid identifier behave like lookups of a missing record.

use async_trait::async_trait;
use bookstore_kernel::Migration;

use crate::error::StoreError;
use crate::models::{Book, BookDraft, BookField, BookFilter};

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Validate and store a new book, assigning its id and timestamps.
    async fn insert(&self, draft: BookDraft) -> Result<Book, StoreError>;

    /// All books, newest first.
    async fn find_all(&self) -> Result<Vec<Book>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, StoreError>;

    /// Validate and overwrite every field of an existing book.
    ///
    /// Returns `Ok(None)` when no book has this id.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        draft: BookDraft,
    ) -> Result<Option<Book>, StoreError>;

    /// Remove a book, returning it when it existed.
    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Book>, StoreError>;

    /// Unique values of a text field, ascending.
    async fn distinct(&self, field: BookField) -> Result<Vec<String>, StoreError>;

    /// Books matching `filter`, newest first, at most `limit` when given.
    async fn find_where(
        &self,
        filter: &BookFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Book>, StoreError>;

    /// Apply pending schema migrations, returning how many ran.
    async fn migrate(&self, _migrations: &[(String, Migration)]) -> Result<usize, StoreError> {
        Ok(0)
    }

    /// Release the connection; later calls fail with [`StoreError::Closed`].
    async fn close(&self);
}
