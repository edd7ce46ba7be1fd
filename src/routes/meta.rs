//! Gateway metadata endpoints.
//!
//! - GET / : liveness check
//! - GET /openapi.yaml : OpenAPI description of the four operations
//! - GET /.well-known/{file} : agent plugin manifest
//!
//! Documents are embedded from `static/` at build time.

use axum::{
    Json, Router,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_embed::Embed;
use serde_json::{Value, json};

#[derive(Embed)]
#[folder = "static"]
struct Assets;

pub fn routes() -> Router {
    Router::new()
        .route("/", get(health))
        .route("/openapi.yaml", get(openapi))
        .route("/.well-known/{*file}", get(well_known))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "message": "GPT Gateway is running"}))
}

async fn openapi() -> Response {
    serve_asset("openapi.yaml")
}

async fn well_known(Path(file): Path<String>) -> Response {
    serve_asset(&format!("well-known/{}", file))
}

fn serve_asset(path: &str) -> Response {
    match Assets::get(path) {
        Some(content) => {
            let mime = if path.ends_with(".yaml") {
                "text/yaml".to_string()
            } else {
                mime_guess::from_path(path).first_or_octet_stream().to_string()
            };
            ([(header::CONTENT_TYPE, mime)], content.data.into_owned()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"status": "error", "error": format!("Not found: {}", path)})),
        )
            .into_response(),
    }
}
