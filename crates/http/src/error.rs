//! Error handling for the bookstore HTTP layer
//!
//! Page handlers never fail: store errors already became redirects. What is
//! left here are failures of the HTTP layer itself, rendered as an HTML page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::HtmlEscape;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Errors raised while turning an outcome into a response
#[derive(Error, Debug)]
pub enum AppError {
    #[error("unknown view '{0}'")]
    UnknownView(String),

    #[error("failed to render view: {0}")]
    Render(#[from] minijinja::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::UnknownView(_) => "unknown_view",
            AppError::Render(_) => "render_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();
        let timestamp = OffsetDateTime::now_utc();
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let error_code = self.code();

        tracing::error!(
            error_id = %error_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            error = %self,
            "Request error"
        );

        // Release builds never show the cause to visitors.
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            "Something went wrong while preparing this page.".to_string()
        };

        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>Error</title></head><body>\
             <h1>Something went wrong</h1><p>{}</p>\
             <p><small>Error id {} at {}</small></p>\
             <p><a href=\"/\">Back to the bookstore</a></p></body></html>",
            HtmlEscape(&message),
            error_id,
            timestamp
        );

        (status, Html(body)).into_response()
    }
}
