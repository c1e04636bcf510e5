use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use models::item::{self, parse_id};
use models::payload::{ItemDraft, ItemPatch, ListFilter};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::item::repository::ItemRepository;

/// Process-local store with the same observable behavior as the database
/// gateway: newest-first listing, the same identifier parsing and column
/// coercion. Backs `backend = "memory"` and the test suites.
#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    rows: Arc<RwLock<Vec<item::Model>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize { self.rows.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.rows.read().await.is_empty() }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, draft: ItemDraft) -> Result<item::Model, ServiceError> {
        let model = draft.into_model(Uuid::new_v4(), Utc::now())?;
        self.rows.write().await.push(model.clone());
        Ok(model)
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<item::Model>, ServiceError> {
        let rows = self.rows.read().await;
        // Rows are kept in insertion order; reversing first keeps same-instant
        // rows newest-first under the stable sort.
        let mut out: Vec<item::Model> = rows.iter().rev().filter(|r| filter.matches(r)).cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn get(&self, id: &str) -> Result<Option<item::Model>, ServiceError> {
        let id = parse_id(id)?;
        Ok(self.rows.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, id: &str, patch: ItemPatch) -> Result<Option<item::Model>, ServiceError> {
        let id = parse_id(id)?;
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else { return Ok(None) };
        patch.apply_to_model(row)?;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<item::Model>, ServiceError> {
        let id = parse_id(id)?;
        let mut rows = self.rows.write().await;
        Ok(rows.iter().position(|r| r.id == id).map(|idx| rows.remove(idx)))
    }
}
