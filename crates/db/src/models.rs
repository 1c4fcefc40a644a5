use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Cover shown for books saved without an image.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1544716278-ca5e3f4abd8c?w=300";

/// A stored catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub stock: i64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a fresh record from validated fields.
    pub(crate) fn create(fields: BookFields, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: fields.title,
            author: fields.author,
            isbn: fields.isbn,
            price: fields.price,
            category: fields.category,
            description: fields.description,
            stock: fields.stock,
            image_url: fields.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every user-editable field, keeping id and creation time.
    pub(crate) fn overwrite(&mut self, fields: BookFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.author = fields.author;
        self.isbn = fields.isbn;
        self.price = fields.price;
        self.category = fields.category;
        self.description = fields.description;
        self.stock = fields.stock;
        self.image_url = fields.image_url;
        self.updated_at = now;
    }

    /// Text value of a selectable field.
    pub fn field(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Isbn => &self.isbn,
            BookField::Category => &self.category,
            BookField::Description => &self.description,
            BookField::ImageUrl => &self.image_url,
        }
    }
}

/// Unvalidated book fields as they arrive from a form, after numeric coercion.
///
/// `None` for `price` or `stock` means the value was absent or not a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: Option<f64>,
    pub category: String,
    pub description: String,
    pub stock: Option<i64>,
    pub image_url: Option<String>,
}

/// Book fields that passed validation and are safe to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub stock: i64,
    pub image_url: String,
}

impl BookDraft {
    /// Check required fields and numeric minimums, filling in the default
    /// image when none was given.
    pub fn validate(self) -> Result<BookFields, ValidationError> {
        let title = required("title", self.title)?;
        let author = required("author", self.author)?;
        let isbn = required("isbn", self.isbn)?;
        let category = required("category", self.category)?;
        let description = required("description", self.description)?;

        let price = match self.price {
            Some(price) if price.is_finite() => price,
            _ => return Err(ValidationError::Missing { field: "price" }),
        };
        if price < 0.0 {
            return Err(ValidationError::Negative { field: "price" });
        }

        let stock = self
            .stock
            .ok_or(ValidationError::Missing { field: "stock" })?;
        if stock < 0 {
            return Err(ValidationError::Negative { field: "stock" });
        }

        let image_url = self
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

        Ok(BookFields {
            title,
            author,
            isbn,
            price,
            category,
            description,
            stock,
            image_url,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing { field })
    } else {
        Ok(value)
    }
}

/// Text fields that can be listed with `distinct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Isbn,
    Category,
    Description,
    ImageUrl,
}

impl BookField {
    /// Column holding this field in SQL backends.
    pub fn column(self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Isbn => "isbn",
            BookField::Category => "category",
            BookField::Description => "description",
            BookField::ImageUrl => "image_url",
        }
    }
}

/// Predicate for `find_where`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    /// Exact category match
    Category(String),
    /// Case-insensitive substring of title, author or category
    Search(String),
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::Category(category) => book.category == *category,
            BookFilter::Search(query) => {
                let needle = query.to_lowercase();
                [&book.title, &book.author, &book.category]
                    .iter()
                    .any(|value| value.to_lowercase().contains(&needle))
            }
        }
    }
}
