use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum::{Router, routing::get};
use tower::ServiceExt;

use bookshelf::assets::serve_embedded;
use bookshelf::catalog;
use bookshelf::db::Database;
use bookshelf::handler::{AppState, healthcheck, home};

async fn test_app() -> Router {
    let db = Arc::new(Database::open_in_memory().await.unwrap());
    Router::new()
        .route("/", get(home))
        .route("/health", get(healthcheck))
        .nest("/books", catalog::routes())
        .fallback(serve_embedded)
        .with_state(AppState { db })
}

async fn get_path(app: &Router, path: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, path: &str, form: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn root_redirects_to_books() {
    let app = test_app().await;

    let response = get_path(&app, "/").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/books");
}

#[tokio::test]
async fn healthcheck_responds_ok() {
    let app = test_app().await;

    let response = get_path(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("ok"));
}

#[tokio::test]
async fn empty_catalog_renders_placeholder() {
    let app = test_app().await;

    let response = get_path(&app, "/books").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("The catalog has no matching books."));
}

#[tokio::test]
async fn junk_pagination_input_is_not_an_error() {
    let app = test_app().await;

    let response = get_path(&app, "/books?page=abc&size=999&term=").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_redirects_and_lists_the_book() {
    let app = test_app().await;

    let response = post_form(
        &app,
        "/books/new",
        "title=Dune&author=Frank+Herbert&genre=Science+Fiction&year=1965",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/books");

    let body = body_text(get_path(&app, "/books").await).await;
    assert!(body.contains("Dune"));
    assert!(body.contains("Frank Herbert"));
}

#[tokio::test]
async fn invalid_create_rerenders_with_entered_values() {
    let app = test_app().await;

    let response = post_form(&app, "/books/new", "title=&author=Frank+Herbert&genre=&year=").await;

    // Validation failures are not error responses.
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("&quot;Title&quot; is required"));
    assert!(body.contains("Frank Herbert"));

    // Nothing was persisted.
    let list = body_text(get_path(&app, "/books").await).await;
    assert!(list.contains("The catalog has no matching books."));
}

#[tokio::test]
async fn update_form_is_prefilled_or_404() {
    let app = test_app().await;
    post_form(&app, "/books/new", "title=Emma&author=Jane+Austen&genre=&year=1815").await;

    let response = get_path(&app, "/books/update/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Emma"));
    assert!(body.contains("1815"));

    let missing = get_path(&app, "/books/update/999").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let garbled = get_path(&app, "/books/update/not-a-number").await;
    assert_eq!(garbled.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_renders_confirmation() {
    let app = test_app().await;
    post_form(&app, "/books/new", "title=Emma&author=Jane+Austen&genre=&year=").await;

    let response = post_form(
        &app,
        "/books/update/1",
        "title=Emma&author=Jane+Austen&genre=Romance&year=1815",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("was updated"));

    let missing = post_form(&app, "/books/update/999", "title=X&author=Y&genre=&year=").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_update_rerenders_with_errors() {
    let app = test_app().await;
    post_form(&app, "/books/new", "title=Emma&author=Jane+Austen&genre=&year=").await;

    let response = post_form(&app, "/books/update/1", "title=&author=&genre=&year=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("&quot;Title&quot; is required"));
    assert!(body.contains("&quot;Author&quot; is required"));
}

#[tokio::test]
async fn delete_flow_confirms_then_removes() {
    let app = test_app().await;
    post_form(&app, "/books/new", "title=Dune&author=Frank+Herbert&genre=&year=").await;

    let confirm = get_path(&app, "/books/1/delete").await;
    assert_eq!(confirm.status(), StatusCode::OK);
    assert!(body_text(confirm).await.contains("Dune"));

    let deleted = post_form(&app, "/books/1/delete", "").await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let body = body_text(deleted).await;
    assert!(body.contains("Dune"));
    assert!(body.contains("was removed"));

    // Deleting again is a 404.
    let again = post_form(&app, "/books/1/delete", "").await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_path_renders_not_found_page() {
    let app = test_app().await;

    let response = get_path(&app, "/no-such-page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("That page does not exist."));
}

#[tokio::test]
async fn embedded_search_script_is_served() {
    let app = test_app().await;

    let response = get_path(&app, "/static/scripts/search.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.contains("javascript"));
}
