use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: String,
    pub nama_pelanggan: String,
    pub jenis_sepatu: String,
    pub warna: Option<String>,
    pub layanan: String,
    pub status: String,
    pub harga: f64,
    /// RFC 3339 timestamp
    pub tanggal_masuk: String,
    pub estimasi_selesai: Option<String>,
    pub created_at: String,
}

/// Only presence is checked; `status` defaults to `Dalam Proses`,
/// `tanggal_masuk` to the time of the request.
#[derive(ToSchema)]
pub struct CreateItemInputDoc {
    pub nama_pelanggan: String,
    pub jenis_sepatu: String,
    pub warna: Option<String>,
    pub layanan: String,
    pub status: Option<String>,
    pub harga: f64,
    pub tanggal_masuk: Option<String>,
    pub estimasi_selesai: Option<String>,
}

/// Empty, zero and null values are ignored rather than written.
#[derive(ToSchema)]
pub struct UpdateItemInputDoc {
    pub nama_pelanggan: Option<String>,
    pub jenis_sepatu: Option<String>,
    pub warna: Option<String>,
    pub layanan: Option<String>,
    pub status: Option<String>,
    pub harga: Option<f64>,
    pub estimasi_selesai: Option<String>,
}

#[derive(ToSchema)]
pub struct ItemResponseDoc {
    pub success: bool,
    pub message: Option<String>,
    pub data: ItemDoc,
}

#[derive(ToSchema)]
pub struct ItemListResponseDoc {
    pub success: bool,
    pub count: usize,
    pub data: Vec<ItemDoc>,
}

#[derive(ToSchema)]
pub struct FailureDoc {
    pub success: bool,
    pub error: String,
    pub required: Option<Vec<String>>,
    pub missing: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::items::list,
        crate::items::create,
        crate::items::get,
        crate::items::update,
        crate::items::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            CreateItemInputDoc,
            UpdateItemInputDoc,
            ItemResponseDoc,
            ItemListResponseDoc,
            FailureDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;
