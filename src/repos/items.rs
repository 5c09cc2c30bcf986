//! Item repository functions, generic over `ConnectionTrait` so they run
//! against the shared pool and open transactions alike.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::items;

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    description: &str,
) -> Result<items::Model, sea_orm::DbErr> {
    let item = items::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(description.to_string()),
    };
    item.insert(conn).await
}

/// Window over the table in insertion order. `skip` rows are dropped from the
/// front, at most `limit` rows are returned; a window past the end of the
/// table is an empty list, not an error.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<items::Model>, sea_orm::DbErr> {
    items::Entity::find()
        .order_by_asc(items::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<items::Model>, sea_orm::DbErr> {
    items::Entity::find_by_id(id).one(conn).await
}

/// Replace name and description in place. `None` when no row has the id.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    name: &str,
    description: &str,
) -> Result<Option<items::Model>, sea_orm::DbErr> {
    let Some(existing) = items::Entity::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };

    let mut active: items::ActiveModel = existing.into();
    active.name = Set(name.to_string());
    active.description = Set(description.to_string());

    let updated = active.update(conn).await?;
    Ok(Some(updated))
}

/// Remove the row. `false` when no row had the id.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let res = items::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected > 0)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    items::Entity::find().count(conn).await
}
