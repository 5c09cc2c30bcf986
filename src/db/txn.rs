use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::error;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Execute a closure within a database transaction.
///
/// Begins a transaction on the shared pool, commits on `Ok`, and rolls back
/// on `Err`. Rollback is best-effort and never masks the operation's error.
/// The pooled connection is released when the transaction is dropped, on
/// every exit path.
///
/// The closure returns a boxed future tied to the transaction borrow, so it
/// can capture request data alongside the `txn` reference.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> LocalBoxFuture<'c, Result<R, AppError>>,
{
    let txn = state.db.begin().await.map_err(|e| {
        error!(error = %e, "failed to begin transaction");
        AppError::db("Internal server error")
    })?;

    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn.commit().await.map_err(|e| {
                error!(error = %e, "failed to commit transaction");
                AppError::db("Internal server error")
            })?;
            Ok(val)
        }
        Err(err) => {
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
