//! In-process book collection, used for development and tests.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Book, BookDraft, BookField, BookFilter};
use crate::parse_id;
use crate::store::BookStore;

/// Books kept in insertion order behind an async lock.
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
    closed: AtomicBool,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }
}

/// Newest first; equal timestamps keep the later insertion in front.
fn newest_first<'a>(books: impl DoubleEndedIterator<Item = &'a Book>) -> Vec<Book> {
    let mut sorted: Vec<Book> = books.rev().cloned().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, draft: BookDraft) -> Result<Book, StoreError> {
        self.ensure_open()?;
        let fields = draft.validate()?;
        let book = Book::create(fields, Utc::now());

        self.books.write().await.push(book.clone());
        tracing::debug!(id = %book.id, "book inserted");
        Ok(book)
    }

    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        self.ensure_open()?;
        let books = self.books.read().await;
        Ok(newest_first(books.iter()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, StoreError> {
        self.ensure_open()?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == id).cloned())
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

        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|book| book.id == id).map(|book| {
            book.overwrite(fields, Utc::now());
            book.clone()
        }))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Book>, StoreError> {
        self.ensure_open()?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let mut books = self.books.write().await;
        Ok(books
            .iter()
            .position(|book| book.id == id)
            .map(|index| books.remove(index)))
    }

    async fn distinct(&self, field: BookField) -> Result<Vec<String>, StoreError> {
        self.ensure_open()?;
        let books = self.books.read().await;
        let values: BTreeSet<&str> = books.iter().map(|book| book.field(field)).collect();
        Ok(values.into_iter().map(str::to_string).collect())
    }

    async fn find_where(
        &self,
        filter: &BookFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Book>, StoreError> {
        self.ensure_open()?;
        let books = self.books.read().await;
        let mut matching = newest_first(books.iter().filter(|book| filter.matches(book)));
        if let Some(limit) = limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        tracing::info!("memory book store closed");
    }
}
