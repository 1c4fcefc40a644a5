//! What a page handler decided to do with a request.
//!
//! Handlers never build HTTP responses themselves. They return an [`Outcome`]
//! and the http crate turns it into a rendered page or a redirect, which keeps
//! handlers testable without a server.

use serde_json::Value;

/// Result of a page handler: render a view or redirect elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Render the named view with the given context
    Render { view: &'static str, context: Value },
    /// Redirect the browser to another location
    Redirect { to: String },
}

impl Outcome {
    /// Render a view with a JSON object context
    pub fn render(view: &'static str, context: Value) -> Self {
        Self::Render { view, context }
    }

    /// Render a view that needs no data
    pub fn view(view: &'static str) -> Self {
        Self::Render {
            view,
            context: Value::Object(Default::default()),
        }
    }

    /// Redirect to the given location
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect { to: to.into() }
    }

    /// Location of a redirect, `None` when rendering
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect { to } => Some(to),
            Self::Render { .. } => None,
        }
    }

    /// View name of a render, `None` when redirecting
    pub fn view_name(&self) -> Option<&'static str> {
        match self {
            Self::Render { view, .. } => Some(view),
            Self::Redirect { .. } => None,
        }
    }

    /// Context value under `key` of a render
    pub fn context(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Render { context, .. } => context.get(key),
            Self::Redirect { .. } => None,
        }
    }
}
