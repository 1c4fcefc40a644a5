//! Router builder for the bookstore HTTP server

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    extract::{Query, Request},
    http::{HeaderName, Method},
    Router,
};
use tower::util::MapRequest;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::MakeRequestUuid;

/// Query parameter carrying the intended verb of a form POST
pub const METHOD_OVERRIDE_PARAM: &str = "_method";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builder for constructing the main HTTP router
///
/// Routes and modules can be added in any order; middleware is applied in
/// [`RouterBuilder::build`] so it wraps every route.
pub struct RouterBuilder {
    router: Router,
    tracing: bool,
    request_id: bool,
    timeout: Option<Duration>,
    static_dir: Option<PathBuf>,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            tracing: false,
            request_id: false,
            timeout: None,
            static_dir: None,
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's pages at the site root
    pub fn mount_module(mut self, module_router: Router) -> Self {
        self.router = self.router.merge(module_router);
        self
    }

    /// Log every request and response
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    /// Attach an `x-request-id` header to requests and responses
    pub fn with_request_id(mut self) -> Self {
        self.request_id = true;
        self
    }

    /// Abort requests that take longer than `timeout_ms`
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(Duration::from_millis(timeout_ms));
        self
    }

    /// Serve files from `dir` for paths no route claims
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        let mut router = self.router;

        if let Some(dir) = self.static_dir {
            router = router.fallback_service(ServeDir::new(dir));
        }

        if let Some(timeout) = self.timeout {
            router = router.layer(TimeoutLayer::new(timeout));
        }

        if self.tracing {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            );
        }

        if self.request_id {
            let header = HeaderName::from_static(REQUEST_ID_HEADER);
            // Propagate sits inside Set so the generated id reaches the response.
            router = router
                .layer(PropagateRequestIdLayer::new(header.clone()))
                .layer(SetRequestIdLayer::new(header, MakeRequestUuid));
        }

        router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite `POST ...?_method=PUT|PATCH|DELETE` to that verb.
///
/// HTML forms can only submit GET and POST. This must run before routing,
/// so it wraps the router instead of being layered onto it.
pub fn override_method(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }

    let Ok(Query(params)) = Query::<HashMap<String, String>>::try_from_uri(request.uri()) else {
        return request;
    };

    let overridden = params
        .get(METHOD_OVERRIDE_PARAM)
        .map(|verb| verb.trim().to_ascii_uppercase());

    let method = match overridden.as_deref() {
        Some("PUT") => Method::PUT,
        Some("PATCH") => Method::PATCH,
        Some("DELETE") => Method::DELETE,
        _ => return request,
    };

    tracing::debug!(uri = %request.uri(), %method, "method override");
    *request.method_mut() = method;
    request
}

/// Router wrapped with [`override_method`]
pub type SiteService = MapRequest<Router, fn(Request) -> Request>;

/// Wrap a built router so overridden verbs are routed correctly
pub fn with_method_override(router: Router) -> SiteService {
    MapRequest::new(router, override_method as fn(Request) -> Request)
}
