//! HTTP Handlers for the catalog routes.
//!
//! Every handler returns `Result<Response, AppError>`: a missing id maps to
//! the not-found page, a store failure to the generic error page. Validation
//! failures are intercepted here and re-render the originating form with the
//! entered values, status 200.

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

use super::view::{self, FormMode};
use super::{BookDraft, Catalog, ListingParams, ListingQuery};
use crate::error::AppError;
use crate::handler::AppState;

fn parse_id(raw: &str) -> Result<i64, AppError> {
    // A non-numeric id can't name a book; same outcome as an unknown one.
    raw.parse::<i64>().map_err(|_| AppError::NotFound("book"))
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Response, AppError> {
    let query = ListingQuery::resolve(params);
    let catalog = Catalog::new(state.db.connection());

    let result = catalog.list(&query).await?;

    Ok(view::book_list(&result, &query).into_response())
}

pub async fn new_book_form() -> Response {
    view::book_form(FormMode::Create, &BookDraft::default(), &[]).into_response()
}

pub async fn create_book(
    State(state): State<AppState>,
    Form(draft): Form<BookDraft>,
) -> Result<Response, AppError> {
    let input = match draft.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(view::book_form(FormMode::Create, &draft, &errors).into_response());
        }
    };

    let catalog = Catalog::new(state.db.connection());
    let book = catalog.create_book(&input).await?;
    tracing::info!(book_id = book.id, "created book");

    Ok(Redirect::to("/books").into_response())
}

pub async fn update_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let catalog = Catalog::new(state.db.connection());

    match catalog.get_book(id).await? {
        Some(book) => {
            let draft = BookDraft::from(&book);
            Ok(view::book_form(FormMode::Update(id), &draft, &[]).into_response())
        }
        None => Err(AppError::NotFound("book")),
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(draft): Form<BookDraft>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let catalog = Catalog::new(state.db.connection());

    // Unknown ids 404 before validation, matching the form flow.
    if catalog.get_book(id).await?.is_none() {
        return Err(AppError::NotFound("book"));
    }

    let input = match draft.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(view::book_form(FormMode::Update(id), &draft, &errors).into_response());
        }
    };

    match catalog.update_book(id, &input).await? {
        Some(book) => {
            tracing::info!(book_id = book.id, "updated book");
            Ok(view::book_updated(&book).into_response())
        }
        None => Err(AppError::NotFound("book")),
    }
}

pub async fn delete_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let catalog = Catalog::new(state.db.connection());

    match catalog.get_book(id).await? {
        Some(book) => Ok(view::delete_confirm(&book).into_response()),
        None => Err(AppError::NotFound("book")),
    }
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let catalog = Catalog::new(state.db.connection());

    match catalog.delete_book(id).await? {
        Some(book) => {
            tracing::info!(book_id = book.id, title = %book.title, "deleted book");
            Ok(view::book_deleted(&book).into_response())
        }
        None => Err(AppError::NotFound("book")),
    }
}
