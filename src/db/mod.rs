pub mod txn;

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

/// Lightweight is-alive query shared by the health, readiness, and metrics
/// probes.
pub async fn probe(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    db.query_one(Statement::from_string(
        db.get_database_backend(),
        "SELECT 1 AS health_check".to_string(),
    ))
    .await?;
    Ok(())
}
