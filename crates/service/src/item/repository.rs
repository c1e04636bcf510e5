use async_trait::async_trait;
use models::item;
use models::payload::{ItemDraft, ItemPatch, ListFilter};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Store gateway for service orders. Each call is one atomic single-record
/// operation; `Ok(None)` means no row matched the identifier.
///
/// Identifiers are opaque strings. An identifier the store cannot address
/// is reported as `ServiceError::Db`, not as a missing row.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, draft: ItemDraft) -> Result<item::Model, ServiceError>;
    async fn list(&self, filter: &ListFilter) -> Result<Vec<item::Model>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<item::Model>, ServiceError>;
    async fn update(&self, id: &str, patch: ItemPatch) -> Result<Option<item::Model>, ServiceError>;
    async fn delete(&self, id: &str) -> Result<Option<item::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmItemRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn create(&self, draft: ItemDraft) -> Result<item::Model, ServiceError> {
        crate::db::item_store::insert_item(&self.db, draft).await
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<item::Model>, ServiceError> {
        crate::db::item_store::list_items(&self.db, filter).await
    }

    async fn get(&self, id: &str) -> Result<Option<item::Model>, ServiceError> {
        crate::db::item_store::get_item(&self.db, id).await
    }

    async fn update(&self, id: &str, patch: ItemPatch) -> Result<Option<item::Model>, ServiceError> {
        crate::db::item_store::update_item(&self.db, id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<Option<item::Model>, ServiceError> {
        crate::db::item_store::delete_item(&self.db, id).await
    }
}
