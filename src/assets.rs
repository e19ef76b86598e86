use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

use crate::catalog::view;

#[derive(Embed)]
#[folder = "static"]
pub struct Assets;

/// Fallback handler: serves the embedded static tree and renders the
/// not-found page for anything else.
pub async fn serve_embedded(req: Request<Body>) -> impl IntoResponse {
    let path = req.uri().path().trim_start_matches('/');
    let path = path.strip_prefix("static/").unwrap_or(path);

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
                .unwrap()
        }
        None => (StatusCode::NOT_FOUND, view::page_not_found()).into_response(),
    }
}
