//! Book page handlers.
//!
//! Each handler maps its inputs onto store calls and returns an [`Outcome`].
//! A failing store call is logged and answered with a redirect to a safe
//! page; visitors never see the raw error.

use std::fmt::Display;

use bookstore_db::{BookField, BookFilter, BookStore};
use bookstore_kernel::Outcome;
use serde_json::{json, Map, Value};

use super::models::BookForm;

/// Books shown per category on the categories page.
pub const CATEGORY_PREVIEW_LIMIT: usize = 4;

fn recover(action: &'static str, error: impl Display, fallback: impl Into<String>) -> Outcome {
    let fallback = fallback.into();
    tracing::error!(action, %error, fallback = %fallback, "book store call failed");
    Outcome::redirect(fallback)
}

/// GET /books
pub async fn list_books(store: &dyn BookStore) -> Outcome {
    match store.find_all().await {
        Ok(books) => Outcome::render("books", json!({ "books": books })),
        Err(error) => recover("list books", error, "/"),
    }
}

/// GET /books/add
pub fn add_book_form() -> Outcome {
    Outcome::view("add-book")
}

/// POST /books
pub async fn create_book(store: &dyn BookStore, form: BookForm) -> Outcome {
    match store.insert(form.into_draft()).await {
        Ok(book) => {
            tracing::info!(id = %book.id, title = %book.title, "book created");
            Outcome::redirect("/books")
        }
        Err(error) => recover("create book", error, "/books/add"),
    }
}

/// GET /books/edit/{id}
pub async fn edit_book_form(store: &dyn BookStore, id: &str) -> Outcome {
    match store.find_by_id(id).await {
        Ok(Some(book)) => Outcome::render("edit-book", json!({ "book": book })),
        Ok(None) => {
            tracing::warn!(id, "edit requested for unknown book");
            Outcome::redirect("/books")
        }
        Err(error) => recover("load book for edit", error, "/books"),
    }
}

/// PUT /books/{id}
pub async fn update_book(store: &dyn BookStore, id: &str, form: BookForm) -> Outcome {
    match store.find_by_id_and_update(id, form.into_draft()).await {
        Ok(Some(book)) => {
            tracing::info!(id = %book.id, "book updated");
            Outcome::redirect("/books")
        }
        Ok(None) => {
            tracing::warn!(id, "update requested for unknown book");
            Outcome::redirect("/books")
        }
        Err(error) => recover(
            "update book",
            error,
            format!("/books/edit/{}", urlencoding::encode(id)),
        ),
    }
}

/// DELETE /books/{id}
pub async fn delete_book(store: &dyn BookStore, id: &str) -> Outcome {
    match store.find_by_id_and_delete(id).await {
        Ok(Some(book)) => {
            tracing::info!(id = %book.id, title = %book.title, "book deleted");
            Outcome::redirect("/books")
        }
        Ok(None) => {
            tracing::warn!(id, "delete requested for unknown book");
            Outcome::redirect("/books")
        }
        Err(error) => recover("delete book", error, "/books"),
    }
}

/// GET /books/search?q=
pub async fn search_books(store: &dyn BookStore, query: String) -> Outcome {
    let filter = BookFilter::Search(query.clone());
    match store.find_where(&filter, None).await {
        Ok(books) => Outcome::render(
            "books",
            json!({ "books": books, "searchQuery": query }),
        ),
        Err(error) => recover("search books", error, "/books"),
    }
}

/// GET /categories
pub async fn list_categories(store: &dyn BookStore) -> Outcome {
    let categories = match store.distinct(BookField::Category).await {
        Ok(categories) => categories,
        Err(error) => return recover("list categories", error, "/"),
    };

    let mut books_by_category = Map::new();
    for category in &categories {
        let filter = BookFilter::Category(category.clone());
        match store
            .find_where(&filter, Some(CATEGORY_PREVIEW_LIMIT))
            .await
        {
            Ok(books) => {
                books_by_category.insert(category.clone(), json!(books));
            }
            Err(error) => return recover("preview category", error, "/"),
        }
    }

    Outcome::render(
        "categories",
        json!({
            "categories": categories,
            "booksByCategory": Value::Object(books_by_category),
        }),
    )
}

/// GET /categories/{category}
pub async fn category_books(store: &dyn BookStore, category: String) -> Outcome {
    let filter = BookFilter::Category(category.clone());
    match store.find_where(&filter, None).await {
        Ok(books) => Outcome::render("books", json!({ "books": books, "category": category })),
        Err(error) => recover("list category", error, "/categories"),
    }
}
