//! Static information pages and the contact/feedback forms.
//!
//! Form submissions are only logged; nothing is persisted or mailed.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::Response,
    routing::get,
    Form, Router,
};
use bookstore_http::Views;
use bookstore_kernel::{Module, Outcome};
use serde::Deserialize;
use serde_json::json;

/// Query string of the form pages after a submission.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Notice {
    pub success: Option<String>,
}

impl Notice {
    fn succeeded(&self) -> bool {
        self.success.as_deref() == Some("true")
    }
}

/// Which form a submission came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbox {
    Contact,
    Feedback,
}

impl Inbox {
    fn view(self) -> &'static str {
        match self {
            Inbox::Contact => "contact",
            Inbox::Feedback => "feedback",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Inbox::Contact => "/contact",
            Inbox::Feedback => "/feedback",
        }
    }
}

pub fn home() -> Outcome {
    Outcome::view("index")
}

pub fn about() -> Outcome {
    Outcome::view("about")
}

/// Render a form page, thanking the visitor after a submission
pub fn form_page(inbox: Inbox, notice: &Notice) -> Outcome {
    Outcome::render(inbox.view(), json!({ "success": notice.succeeded() }))
}

/// Log a submission and send the visitor back with a notice
pub fn submit(inbox: Inbox, fields: &BTreeMap<String, String>) -> Outcome {
    tracing::info!(
        form = inbox.view(),
        sender = fields.get("name").map(String::as_str).unwrap_or_default(),
        reply_to = fields.get("email").map(String::as_str).unwrap_or_default(),
        fields = fields.len(),
        "form submission received"
    );
    Outcome::redirect(format!("{}?success=true", inbox.path()))
}

/// Unreadable bodies still count as a submission, just an empty one.
fn submitted_fields(
    body: Result<Form<BTreeMap<String, String>>, FormRejection>,
) -> BTreeMap<String, String> {
    match body {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable form body, logging an empty submission");
            BTreeMap::new()
        }
    }
}

pub struct PagesModule {
    views: Views,
}

impl PagesModule {
    pub fn new(views: Views) -> Self {
        Self { views }
    }
}

#[async_trait]
impl Module for PagesModule {
    fn name(&self) -> &'static str {
        "pages"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(home_page))
            .route("/about", get(about_page))
            .route("/contact", get(contact_page).post(contact_submit))
            .route("/feedback", get(feedback_page).post(feedback_submit))
            .with_state(self.views.clone())
    }
}

async fn home_page(State(views): State<Views>) -> Response {
    views.respond(home())
}

async fn about_page(State(views): State<Views>) -> Response {
    views.respond(about())
}

async fn contact_page(State(views): State<Views>, Query(notice): Query<Notice>) -> Response {
    views.respond(form_page(Inbox::Contact, &notice))
}

async fn contact_submit(
    State(views): State<Views>,
    body: Result<Form<BTreeMap<String, String>>, FormRejection>,
) -> Response {
    views.respond(submit(Inbox::Contact, &submitted_fields(body)))
}

async fn feedback_page(State(views): State<Views>, Query(notice): Query<Notice>) -> Response {
    views.respond(form_page(Inbox::Feedback, &notice))
}

async fn feedback_submit(
    State(views): State<Views>,
    body: Result<Form<BTreeMap<String, String>>, FormRejection>,
) -> Response {
    views.respond(submit(Inbox::Feedback, &submitted_fields(body)))
}

/// Create the pages module
pub fn create_module(views: Views) -> Arc<dyn Module> {
    Arc::new(PagesModule::new(views))
}
