use bookstore_db::BookDraft;
use serde::{Deserialize, Serialize};

use crate::utils;

/// Form body submitted by the add and edit book pages.
///
/// Every field arrives as text; numbers are coerced in [`BookForm::into_draft`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub stock: String,
    pub image_url: Option<String>,
}

impl BookForm {
    /// Coerce price and stock; schema rules are checked by the store.
    pub fn into_draft(self) -> BookDraft {
        BookDraft {
            price: utils::parse_float(&self.price),
            stock: utils::parse_int(&self.stock),
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

/// Query string of the search page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub q: String,
}
