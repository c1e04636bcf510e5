use chrono::Utc;
use models::item::{self, parse_id, Entity as ItemEntity};
use models::payload::{ItemDraft, ItemPatch, ListFilter};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Insert one record; the id and creation time are assigned here.
pub async fn insert_item(db: &DatabaseConnection, draft: ItemDraft) -> Result<item::Model, ServiceError> {
    let am = draft.into_active_model(Uuid::new_v4(), Utc::now())?;
    am.insert(db).await.map_err(ServiceError::db)
}

/// All records, newest first, optionally restricted to one status.
pub async fn list_items(db: &DatabaseConnection, filter: &ListFilter) -> Result<Vec<item::Model>, ServiceError> {
    let mut finder = ItemEntity::find();
    if let Some(status) = filter.status.as_deref() {
        finder = finder.filter(item::Column::Status.eq(status));
    }
    finder
        .order_by_desc(item::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

pub async fn get_item(db: &DatabaseConnection, id: &str) -> Result<Option<item::Model>, ServiceError> {
    let id = parse_id(id)?;
    ItemEntity::find_by_id(id).one(db).await.map_err(ServiceError::db)
}

/// Single `UPDATE ... RETURNING` with only the patched columns in `SET`.
/// An empty patch writes nothing and returns the current row.
pub async fn update_item(
    db: &DatabaseConnection,
    id: &str,
    patch: ItemPatch,
) -> Result<Option<item::Model>, ServiceError> {
    let uuid = parse_id(id)?;
    if patch.is_empty() {
        return ItemEntity::find_by_id(uuid).one(db).await.map_err(ServiceError::db);
    }
    let mut am = <item::ActiveModel as Default>::default();
    patch.apply(&mut am)?;
    let rows = ItemEntity::update_many()
        .set(am)
        .filter(item::Column::Id.eq(uuid))
        .exec_with_returning(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(rows.into_iter().next())
}

/// Single `DELETE ... RETURNING`; yields the removed row if there was one.
pub async fn delete_item(db: &DatabaseConnection, id: &str) -> Result<Option<item::Model>, ServiceError> {
    let uuid = parse_id(id)?;
    let stmt = Query::delete()
        .from_table(ItemEntity)
        .and_where(item::Column::Id.eq(uuid))
        .returning_all()
        .to_owned();
    let stmt = db.get_database_backend().build(&stmt);
    ItemEntity::find()
        .from_raw_sql(stmt)
        .one(db)
        .await
        .map_err(ServiceError::db)
}
