use std::sync::Arc;

use axum::{
    Json,
    response::{IntoResponse, Redirect},
};
use tracing::info;

use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn home() -> Redirect {
    Redirect::to("/books")
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(serde_json::json!({ "status": "ok" }))
}
