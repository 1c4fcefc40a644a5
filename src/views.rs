//! Page templates compiled into the binary.

use bookstore_db::DEFAULT_IMAGE_URL;
use bookstore_http::{AppError, Views};
use serde_json::json;

pub const SITE_NAME: &str = "Online Bookstore";

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("macros.html", include_str!("../templates/macros.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("books.html", include_str!("../templates/books.html")),
    ("add-book.html", include_str!("../templates/add-book.html")),
    ("edit-book.html", include_str!("../templates/edit-book.html")),
    ("categories.html", include_str!("../templates/categories.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    ("feedback.html", include_str!("../templates/feedback.html")),
];

/// Compile every page template.
pub fn load() -> Result<Views, AppError> {
    Views::from_templates(
        TEMPLATES,
        json!({
            "site_name": SITE_NAME,
            "default_image_url": DEFAULT_IMAGE_URL,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> serde_json::Value {
        json!({
            "id": "0190a5d2-0000-7000-8000-000000000001",
            "title": "Dune",
            "author": "Herbert",
            "isbn": "123",
            "price": 9.99,
            "category": "Sci-Fi",
            "description": "Spice",
            "stock": 3,
            "imageUrl": "https://covers.example/dune.jpg",
        })
    }

    #[test]
    fn every_template_compiles() {
        load().unwrap();
    }

    #[test]
    fn books_page_lists_cards() {
        let page = load()
            .unwrap()
            .render("books", json!({ "books": [dune()] }))
            .unwrap();
        assert!(page.contains("All books"));
        assert!(page.contains("Dune"));
        assert!(page.contains("_method=DELETE"));
    }

    #[test]
    fn search_page_echoes_query() {
        let page = load()
            .unwrap()
            .render("books", json!({ "books": [], "searchQuery": "dune" }))
            .unwrap();
        assert!(page.contains("Results for"));
        assert!(page.contains("0 books found"));
    }

    #[test]
    fn edit_page_targets_put_override() {
        let page = load()
            .unwrap()
            .render("edit-book", json!({ "book": dune() }))
            .unwrap();
        assert!(page.contains("_method=PUT"));
        assert!(page.contains("value=\"Herbert\""));
    }

    #[test]
    fn add_page_renders_empty_form() {
        let page = load().unwrap().render("add-book", json!({})).unwrap();
        assert!(page.contains("name=\"imageUrl\""));
    }

    #[test]
    fn categories_page_groups_books() {
        let page = load()
            .unwrap()
            .render(
                "categories",
                json!({
                    "categories": ["Sci-Fi"],
                    "booksByCategory": { "Sci-Fi": [dune()] },
                }),
            )
            .unwrap();
        assert!(page.contains("Sci-Fi"));
        assert!(page.contains("Dune"));
    }

    #[test]
    fn contact_page_shows_success_notice() {
        let views = load().unwrap();
        let thanked = views.render("contact", json!({ "success": true })).unwrap();
        assert!(thanked.contains("Thanks for reaching out"));

        let plain = views.render("contact", json!({ "success": false })).unwrap();
        assert!(!plain.contains("Thanks for reaching out"));
    }
}
