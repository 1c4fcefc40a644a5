//! Axum adapters for the book pages.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, put},
    Form, Router,
};

use super::{
    handlers,
    models::{BookForm, SearchParams},
    BooksState,
};

/// Book and category page routes, merged at the site root.
pub fn router(state: BooksState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/add", get(add_book_form))
        .route("/books/search", get(search_books))
        .route("/books/edit/{id}", get(edit_book_form))
        .route("/books/{id}", put(update_book).delete(delete_book))
        .route("/categories", get(list_categories))
        .route("/categories/{category}", get(category_books))
        .with_state(state)
}

async fn list_books(State(state): State<BooksState>) -> Response {
    let outcome = handlers::list_books(state.store.as_ref()).await;
    state.views.respond(outcome)
}

async fn add_book_form(State(state): State<BooksState>) -> Response {
    state.views.respond(handlers::add_book_form())
}

async fn create_book(State(state): State<BooksState>, Form(form): Form<BookForm>) -> Response {
    let outcome = handlers::create_book(state.store.as_ref(), form).await;
    state.views.respond(outcome)
}

async fn edit_book_form(State(state): State<BooksState>, Path(id): Path<String>) -> Response {
    let outcome = handlers::edit_book_form(state.store.as_ref(), &id).await;
    state.views.respond(outcome)
}

async fn update_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> Response {
    let outcome = handlers::update_book(state.store.as_ref(), &id, form).await;
    state.views.respond(outcome)
}

async fn delete_book(State(state): State<BooksState>, Path(id): Path<String>) -> Response {
    let outcome = handlers::delete_book(state.store.as_ref(), &id).await;
    state.views.respond(outcome)
}

async fn search_books(
    State(state): State<BooksState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let outcome = handlers::search_books(state.store.as_ref(), params.q).await;
    state.views.respond(outcome)
}

async fn list_categories(State(state): State<BooksState>) -> Response {
    let outcome = handlers::list_categories(state.store.as_ref()).await;
    state.views.respond(outcome)
}

async fn category_books(
    State(state): State<BooksState>,
    Path(category): Path<String>,
) -> Response {
    let outcome = handlers::category_books(state.store.as_ref(), category).await;
    state.views.respond(outcome)
}
