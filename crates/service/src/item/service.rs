use std::sync::Arc;

use chrono::Utc;
use models::item;
use models::payload::{ItemDraft, ItemPatch, ListFilter};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::item::repository::ItemRepository;

/// Application service for service orders: maps raw payloads, calls the
/// store exactly once per operation, and reports zero-row outcomes as
/// `ServiceError::NotFound`.
#[derive(Clone)]
pub struct ItemService {
    repo: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self { Self { repo } }

    /// Validation failures return before the store is touched.
    #[instrument(skip_all)]
    pub async fn create(&self, payload: &Value) -> Result<item::Model, ServiceError> {
        let draft = ItemDraft::from_payload(payload, Utc::now())?;
        let created = self.repo.create(draft).await?;
        info!(id = %created.id, status = %created.status, "created item");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: ListFilter) -> Result<Vec<item::Model>, ServiceError> {
        let rows = self.repo.list(&filter).await?;
        debug!(count = rows.len(), "listed items");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<item::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("item"))
    }

    /// Only truthy fields of `payload` are written; see [`ItemPatch`].
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: &Value) -> Result<item::Model, ServiceError> {
        let patch = ItemPatch::from_payload(payload);
        debug!(fields = ?patch.fields(), "update patch");
        let updated = self
            .repo
            .update(id, patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("item"))?;
        info!(id = %updated.id, "updated item");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<item::Model, ServiceError> {
        let deleted = self.repo.delete(id).await?.ok_or_else(|| ServiceError::not_found("item"))?;
        info!(id = %deleted.id, "deleted item");
        Ok(deleted)
    }
}
