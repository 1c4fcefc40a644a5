//! Template rendering for handler outcomes.

use std::sync::Arc;

use axum::response::{Html, IntoResponse, Redirect, Response};
use bookstore_kernel::Outcome;
use minijinja::Environment;
use serde::Serialize;

use crate::error::AppError;

/// Compiled page templates.
///
/// Templates are registered as `<name>.html` so HTML auto-escaping applies;
/// handlers refer to them by bare name.
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    /// Compile `(file name, source)` pairs and register site-wide globals.
    pub fn from_templates(
        templates: &[(&'static str, &'static str)],
        globals: serde_json::Value,
    ) -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.add_filter("path_segment", path_segment);
        for &(name, source) in templates {
            env.add_template(name, source)?;
        }
        if let serde_json::Value::Object(globals) = globals {
            for (name, value) in globals {
                env.add_global(name, minijinja::Value::from_serialize(&value));
            }
        }

        Ok(Self { env: Arc::new(env) })
    }

    /// Render a view by bare name.
    pub fn render(&self, view: &str, context: impl Serialize) -> Result<String, AppError> {
        let template = self
            .env
            .get_template(&template_name(view))
            .map_err(|_| AppError::UnknownView(view.to_string()))?;
        Ok(template.render(context)?)
    }

    /// Turn a handler outcome into a page or a redirect.
    pub fn respond(&self, outcome: Outcome) -> Response {
        match outcome {
            Outcome::Redirect { to } => Redirect::to(&to).into_response(),
            Outcome::Render { view, context } => match self.render(view, context) {
                Ok(page) => Html(page).into_response(),
                Err(error) => error.into_response(),
            },
        }
    }
}

/// Percent-encode a value for use as one URL path segment.
fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn template_name(view: &str) -> String {
    format!("{view}.html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    const LAYOUT: &str =
        "<title>{{ site_name }}</title>{% block content %}{% endblock %}";
    const GREETING: &str =
        "{% extends \"layout.html\" %}{% block content %}Hello {{ name }}{% endblock %}";

    fn views() -> Views {
        Views::from_templates(
            &[("layout.html", LAYOUT), ("greeting.html", GREETING)],
            json!({ "site_name": "Bookstore" }),
        )
        .unwrap()
    }

    #[test]
    fn renders_with_layout_and_globals() {
        let page = views().render("greeting", json!({ "name": "reader" })).unwrap();
        assert_eq!(page, "<title>Bookstore</title>Hello reader");
    }

    #[test]
    fn escapes_html_in_context() {
        let page = views()
            .render("greeting", json!({ "name": "<b>bold</b>" }))
            .unwrap();
        assert!(page.contains("&lt;b&gt;bold"));
        assert!(!page.contains("<b>"));
    }

    #[test]
    fn unknown_view_is_an_error() {
        let err = views().render("missing", json!({})).unwrap_err();
        assert!(matches!(err, AppError::UnknownView(name) if name == "missing"));
    }

    #[test]
    fn bad_template_fails_to_compile() {
        let result = Views::from_templates(&[("broken.html", "{% if %}")], json!({}));
        assert!(matches!(result, Err(AppError::Render(_))));
    }

    #[test]
    fn path_segment_filter_keeps_links_to_one_segment() {
        let views = Views::from_templates(
            &[("link.html", "<a href=\"/categories/{{ name|path_segment }}\">")],
            json!({}),
        )
        .unwrap();

        let page = views
            .render("link", json!({ "name": "Fiction/Fantasy & 100% Fun?" }))
            .unwrap();
        assert_eq!(
            page,
            "<a href=\"/categories/Fiction%2FFantasy%20%26%20100%25%20Fun%3F\">"
        );
    }

    #[test]
    fn redirect_outcome_sets_location() {
        let response = views().respond(Outcome::redirect("/books"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/books");
    }

    #[test]
    fn render_outcome_is_ok_html() {
        let response = views().respond(Outcome::render("greeting", json!({ "name": "x" })));
        assert_eq!(response.status(), StatusCode::OK);
    }
}
