use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use server::routes::{self, AppState};
use service::item::service::ItemService;
use service::storage::memory::InMemoryItemRepository;
use tower::ServiceExt;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app() -> (Router, InMemoryItemRepository) {
    let repo = InMemoryItemRepository::new();
    let state = AppState::new(ItemService::new(Arc::new(repo.clone())));
    (routes::build_router(state, cors()), repo)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

fn order(status: &str) -> Value {
    json!({
        "nama_pelanggan": "Dewi",
        "jenis_sepatu": "Canvas",
        "layanan": "Deep Clean",
        "harga": 30000,
        "status": status
    })
}

async fn create(app: &Router, body: Value) -> anyhow::Result<Value> {
    let (status, json) = send(app, "POST", "/items", Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(json["data"].clone())
}

#[tokio::test]
async fn discovery_lists_operations() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let (status, body) = send(&app, "GET", "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["endpoints"].as_object().map(|m| m.len()), Some(5));
    Ok(())
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_returns_201_envelope_with_defaults() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let (status, body) = send(
        &app,
        "POST",
        "/items",
        Some(json!({"nama_pelanggan": "Dewi", "jenis_sepatu": "Canvas", "layanan": "Deep Clean", "harga": 30000})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Data sepatu berhasil ditambahkan");
    assert_eq!(body["data"]["status"], "Dalam Proses");
    assert_eq!(body["data"]["warna"], Value::Null);
    assert_eq!(body["data"]["estimasi_selesai"], Value::Null);
    assert_eq!(body["data"]["harga"], 30000.0);
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn create_missing_fields_is_400_and_persists_nothing() -> anyhow::Result<()> {
    let (app, repo) = build_app();
    let (status, body) = send(&app, "POST", "/items", Some(json!({"jenis_sepatu": "Canvas", "harga": 0}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Data tidak lengkap");
    assert_eq!(body["missing"], json!(["nama_pelanggan", "layanan", "harga"]));
    assert_eq!(body["required"], json!(["nama_pelanggan", "jenis_sepatu", "layanan", "harga"]));
    assert!(repo.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn create_without_body_is_validation_failure() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let (status, body) = send(&app, "POST", "/items", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missing"].as_array().map(Vec::len), Some(4));
    Ok(())
}

#[tokio::test]
async fn create_with_unstorable_price_is_500() -> anyhow::Result<()> {
    let (app, repo) = build_app();
    let mut payload = order("Dalam Proses");
    payload["harga"] = json!("tiga puluh ribu");
    let (status, body) = send(&app, "POST", "/items", Some(payload)).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap_or_default().contains("numeric"));
    assert!(repo.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn get_twice_returns_identical_records() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let created = create(&app, order("Dalam Proses")).await?;
    let uri = format!("/items/{}", created["id"].as_str().unwrap_or_default());
    let (s1, a) = send(&app, "GET", &uri, None).await?;
    let (s2, b) = send(&app, "GET", &uri, None).await?;
    assert_eq!(s1, StatusCode::OK);
    assert_eq!(s2, StatusCode::OK);
    assert_eq!(a, b);
    assert_eq!(a["data"], created);
    assert!(a.get("message").is_none());
    Ok(())
}

#[tokio::test]
async fn get_unknown_is_404_and_malformed_is_500() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let (status, body) = send(&app, "GET", &format!("/items/{}", uuid_like()), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Data tidak ditemukan"}));

    let (status, body) = send(&app, "GET", "/items/123", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn update_is_partial_and_ignores_falsy_values() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let created = create(&app, order("Antri")).await?;
    let uri = format!("/items/{}", created["id"].as_str().unwrap_or_default());

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"warna": "red"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data berhasil diupdate");
    assert_eq!(body["data"]["warna"], "red");
    assert_eq!(body["data"]["status"], "Antri");

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"harga": 0, "warna": ""}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["harga"], 30000.0);
    assert_eq!(body["data"]["warna"], "red");
    assert_eq!(body["data"]["created_at"], created["created_at"]);
    Ok(())
}

#[tokio::test]
async fn update_unknown_is_404() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let (status, body) = send(&app, "PUT", &format!("/items/{}", uuid_like()), Some(json!({"status": "Selesai"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Data tidak ditemukan");
    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_404() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let created = create(&app, order("Selesai")).await?;
    let uri = format!("/items/{}", created["id"].as_str().unwrap_or_default());

    let (status, body) = send(&app, "DELETE", &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data berhasil dihapus");
    assert_eq!(body["data"], created);

    let (status, _) = send(&app, "GET", &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn list_filters_by_status_newest_first() -> anyhow::Result<()> {
    let (app, _) = build_app();
    create(&app, order("Dalam Proses")).await?;
    let second = create(&app, order("Selesai")).await?;
    let third = create(&app, order("Selesai")).await?;

    let (status, body) = send(&app, "GET", "/items?status=Selesai", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["id"], third["id"]);
    assert_eq!(body["data"][1]["id"], second["id"]);

    let (_, body) = send(&app, "GET", "/items", None).await?;
    assert_eq!(body["count"], 3);

    let (_, body) = send(&app, "GET", "/items?status=", None).await?;
    assert_eq!(body["count"], 3);

    let (_, body) = send(&app, "GET", "/items?status=Batal", None).await?;
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn list_with_repeated_status_is_enveloped_400() -> anyhow::Result<()> {
    let (app, _) = build_app();
    create(&app, order("Selesai")).await?;
    let (status, body) = send(&app, "GET", "/items?status=a&status=b", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap_or_default().contains("status"));
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn unknown_route_and_method_get_generic_404() -> anyhow::Result<()> {
    let (app, _) = build_app();
    let expected = json!({"success": false, "error": "Endpoint tidak ditemukan"});

    let (status, body) = send(&app, "GET", "/orders", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);

    let (status, body) = send(&app, "PATCH", "/items", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);
    Ok(())
}

fn uuid_like() -> &'static str { "0b6f0f5e-4a5c-4d8e-9a43-2f1f3f0c9a11" }
