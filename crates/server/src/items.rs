//! Handlers for `/items`. Each one runs a single service call and shapes
//! the outcome into the uniform envelope.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use common::types::ApiResponse;
use models::item;
use models::payload::ListFilter;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::routes::AppState;

pub const MSG_CREATED: &str = "Data sepatu berhasil ditambahkan";
pub const MSG_UPDATED: &str = "Data berhasil diupdate";
pub const MSG_DELETED: &str = "Data berhasil dihapus";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact status to match, e.g. `Selesai`
    pub status: Option<String>,
}

/// A missing or unparseable body counts as an empty field set.
fn body_or_empty(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(v)) => v,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "request body ignored");
            Value::Object(Default::default())
        }
    }
}

#[utoipa::path(
    get, path = "/items", tag = "items",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = crate::openapi::ItemListResponseDoc),
        (status = 400, description = "Malformed Query", body = crate::openapi::FailureDoc),
        (status = 500, description = "Store Error", body = crate::openapi::FailureDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<item::Model>>>, ApiError> {
    let Query(q) = query.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let rows = state
        .items
        .list(ListFilter::by_status(q.status))
        .await
        .map_err(|e| ApiError::from_service("list", e))?;
    info!(count = rows.len(), "list items");
    Ok(Json(ApiResponse::listing(rows)))
}

#[utoipa::path(
    post, path = "/items", tag = "items",
    request_body = crate::openapi::CreateItemInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemResponseDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::FailureDoc),
        (status = 500, description = "Store Error", body = crate::openapi::FailureDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<item::Model>>), ApiError> {
    let payload = body_or_empty(body);
    let created = state
        .items
        .create(&payload)
        .await
        .map_err(|e| ApiError::from_service("create", e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::with_message(MSG_CREATED, created))))
}

#[utoipa::path(
    get, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ItemResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::FailureDoc),
        (status = 500, description = "Store Error", body = crate::openapi::FailureDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<item::Model>>, ApiError> {
    let found = state.items.get(&id).await.map_err(|e| ApiError::from_service("get", e))?;
    Ok(Json(ApiResponse::ok(found)))
}

#[utoipa::path(
    put, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    request_body = crate::openapi::UpdateItemInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::FailureDoc),
        (status = 500, description = "Store Error", body = crate::openapi::FailureDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<item::Model>>, ApiError> {
    let payload = body_or_empty(body);
    let updated = state
        .items
        .update(&id, &payload)
        .await
        .map_err(|e| ApiError::from_service("update", e))?;
    Ok(Json(ApiResponse::with_message(MSG_UPDATED, updated)))
}

#[utoipa::path(
    delete, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::ItemResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::FailureDoc),
        (status = 500, description = "Store Error", body = crate::openapi::FailureDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<item::Model>>, ApiError> {
    let deleted = state.items.delete(&id).await.map_err(|e| ApiError::from_service("delete", e))?;
    Ok(Json(ApiResponse::with_message(MSG_DELETED, deleted)))
}
