//! End-to-end page flows through the full router and middleware stack.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use bookstore_app::Site;
use bookstore_db::MemoryBookStore;
use bookstore_http::router::SiteService;
use bookstore_kernel::settings::Settings;
use tower::ServiceExt;

const DUNE_FORM: &str = "title=Dune&author=Herbert&isbn=123&price=9.99\
                         &category=Sci-Fi&description=...&stock=3&imageUrl=";

fn site() -> (Site, SiteService) {
    let site = Site::with_store(Arc::new(MemoryBookStore::new())).unwrap();
    let service = site.service(&Settings::default());
    (site, service)
}

async fn send(service: &SiteService, method: Method, uri: &str, form: Option<&str>) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(form) => {
            request = request.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };
    service
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap()
}

async fn get(service: &SiteService, uri: &str) -> Response {
    send(service, Method::GET, uri, None).await
}

async fn post(service: &SiteService, uri: &str, form: &str) -> Response {
    send(service, Method::POST, uri, Some(form)).await
}

fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn page(response: Response) -> String {
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn first_id(site: &Site) -> String {
    site.store.find_all().await.unwrap()[0].id.to_string()
}

#[tokio::test]
async fn created_book_appears_in_listing() {
    let (_site, service) = site();

    let created = post(&service, "/books", DUNE_FORM).await;
    assert_eq!(location(&created), "/books");

    let listing = page(get(&service, "/books").await).await;
    assert!(listing.contains("Dune"));
    assert!(listing.contains("Herbert"));
}

#[tokio::test]
async fn search_matches_case_insensitively() {
    let (_site, service) = site();
    post(&service, "/books", DUNE_FORM).await;

    let results = page(get(&service, "/books/search?q=dune").await).await;
    assert!(results.contains("Dune"));

    let empty = page(get(&service, "/books/search?q=tolkien").await).await;
    assert!(!empty.contains("Herbert"));
}

#[tokio::test]
async fn invalid_book_returns_to_add_form() {
    let (site, service) = site();

    let rejected = post(&service, "/books", "title=Dune&price=-5").await;
    assert_eq!(location(&rejected), "/books/add");
    assert!(site.store.find_all().await.unwrap().is_empty());

    let form = page(get(&service, "/books/add").await).await;
    assert!(form.contains("name=\"title\""));
}

#[tokio::test]
async fn edit_and_update_through_method_override() {
    let (site, service) = site();
    post(&service, "/books", DUNE_FORM).await;
    let id = first_id(&site).await;

    let form = page(get(&service, &format!("/books/edit/{id}")).await).await;
    assert!(form.contains("_method=PUT"));

    let updated = post(
        &service,
        &format!("/books/{id}?_method=PUT"),
        "title=Dune Messiah&author=Herbert&isbn=124&price=12&category=Sci-Fi\
         &description=Sequel&stock=2&imageUrl=",
    )
    .await;
    assert_eq!(location(&updated), "/books");

    let book = site.store.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(book.title, "Dune Messiah");
    assert_eq!(book.stock, 2);
}

#[tokio::test]
async fn delete_through_method_override() {
    let (site, service) = site();
    post(&service, "/books", DUNE_FORM).await;
    let id = first_id(&site).await;

    let deleted = post(&service, &format!("/books/{id}?_method=DELETE"), "").await;
    assert_eq!(location(&deleted), "/books");
    assert!(site.store.find_all().await.unwrap().is_empty());

    let gone = get(&service, &format!("/books/edit/{id}")).await;
    assert_eq!(location(&gone), "/books");
}

#[tokio::test]
async fn categories_group_books() {
    let (_site, service) = site();
    post(&service, "/books", DUNE_FORM).await;
    post(
        &service,
        "/books",
        "title=Emma&author=Austen&isbn=9&price=5&category=Classics&description=Wit&stock=1",
    )
    .await;

    let overview = page(get(&service, "/categories").await).await;
    assert!(overview.contains("Classics"));
    assert!(overview.contains("Sci-Fi"));

    let classics = page(get(&service, "/categories/Classics").await).await;
    assert!(classics.contains("Emma"));
    assert!(!classics.contains("Dune"));
}

#[tokio::test]
async fn category_links_reach_categories_with_slashes() {
    let (_site, service) = site();
    post(
        &service,
        "/books",
        "title=Mistborn&author=Sanderson&isbn=7&price=8&category=Fiction%2FFantasy\
         &description=Ash&stock=4",
    )
    .await;

    let overview = page(get(&service, "/categories").await).await;
    let start = overview.find("href=\"/categories/").unwrap() + "href=\"".len();
    let end = start + overview[start..].find('"').unwrap();
    let href = &overview[start..end];
    assert_eq!(href, "/categories/Fiction%2FFantasy");

    let listing = page(get(&service, href).await).await;
    assert!(listing.contains("Mistborn"));
}

#[tokio::test]
async fn form_posts_without_form_body_still_redirect() {
    let (_site, service) = site();

    let contact = send(&service, Method::POST, "/contact", None).await;
    assert_eq!(location(&contact), "/contact?success=true");

    let feedback = send(&service, Method::POST, "/feedback", None).await;
    assert_eq!(location(&feedback), "/feedback?success=true");
}

#[tokio::test]
async fn contact_submission_redirects_with_notice() {
    let (_site, service) = site();

    let submitted = post(&service, "/contact", "name=Ada&email=ada@example.com&message=Hi").await;
    assert_eq!(location(&submitted), "/contact?success=true");

    let thanked = page(get(&service, "/contact?success=true").await).await;
    assert!(thanked.contains("Thanks for reaching out"));

    let feedback = post(&service, "/feedback", "message=More+poetry").await;
    assert_eq!(location(&feedback), "/feedback?success=true");
}

#[tokio::test]
async fn informational_pages_and_assets_are_served() {
    let (_site, service) = site();

    assert!(page(get(&service, "/").await).await.contains("Online Bookstore"));
    page(get(&service, "/about").await).await;
    page(get(&service, "/feedback").await).await;
    assert_eq!(page(get(&service, "/healthz").await).await, "ok");

    let stylesheet = get(&service, "/css/style.css").await;
    assert_eq!(stylesheet.status(), StatusCode::OK);

    let missing = get(&service, "/no-such-page").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn closed_store_falls_back_to_home() {
    let (site, service) = site();
    site.store.close().await;

    let listing = get(&service, "/books").await;
    assert_eq!(location(&listing), "/");
}
