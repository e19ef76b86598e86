use axum::{
    Router,
    routing::{get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_books))
        .route("/new", get(handler::new_book_form))
        .route("/new", post(handler::create_book))
        .route("/update/:id", get(handler::update_book_form))
        .route("/update/:id", post(handler::update_book))
        .route("/:id/delete", get(handler::delete_book_form))
        .route("/:id/delete", post(handler::delete_book))
}
