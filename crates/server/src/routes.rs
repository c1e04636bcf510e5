use axum::{routing::get, Json, Router};
use common::types::Health;
use serde_json::{json, Value};
use service::item::service::ItemService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ApiError;
use crate::items;
use crate::openapi::ApiDoc;

/// Version marker reported by the discovery endpoint.
pub const API_VERSION: &str = "1.0.0";

/// Shared handler state. The store handle lives inside `items` and is built
/// once by the caller.
#[derive(Clone)]
pub struct AppState {
    pub items: ItemService,
}

impl AppState {
    pub fn new(items: ItemService) -> Self { Self { items } }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Static description of the available operations.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "API Layanan Cuci Sepatu",
        "version": API_VERSION,
        "endpoints": {
            "GET /items": "Ambil semua data sepatu (support filter ?status=)",
            "GET /items/:id": "Ambil data sepatu berdasarkan ID",
            "POST /items": "Tambah data sepatu baru",
            "PUT /items/:id": "Update data sepatu",
            "DELETE /items/:id": "Hapus data sepatu"
        }
    }))
}

/// Unmatched path or method.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let item_routes = Router::new()
        .route(
            "/items",
            get(items::list).post(items::create).fallback(not_found),
        )
        .route(
            "/items/:id",
            get(items::get)
                .put(items::update)
                .delete(items::delete)
                .fallback(not_found),
        );

    Router::new()
        .route("/", get(index).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .merge(item_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
