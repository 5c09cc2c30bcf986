//! Database bootstrap: build the shared pool and guarantee the schema exists
//! before serving, retrying on a fixed interval while the database comes up.

use std::future::Future;
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{info, warn};

use crate::entities::items;
use crate::error::AppError;

/// Fixed-interval retry schedule for the startup connection.
/// No backoff, no jitter: the database is either coming up or it isn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(3),
        }
    }
}

/// Retry an async operation per the policy, returning the result of the last
/// attempt once all attempts are exhausted.
pub async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    policy: RetryPolicy,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                warn!(
                    attempt = attempt,
                    max_attempts = policy.max_attempts,
                    interval_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "connection_retry=failed"
                );
                last_error = Some(e);
                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        AppError::config("connection retry exhausted without recording an error")
    }))
}

/// Create the `items` table if it does not already exist. Safe to run against
/// an existing schema.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), AppError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(items::Entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt))
        .await
        .map_err(|e| AppError::config(format!("schema creation failed: {e}")))?;
    Ok(())
}

/// Open the connection pool and create the schema, retrying the whole
/// sequence per the policy. Exhausting the policy is fatal for the caller;
/// the service never starts without storage.
pub async fn connect_db(url: &str, policy: RetryPolicy) -> Result<DatabaseConnection, AppError> {
    info!(
        max_attempts = policy.max_attempts,
        interval_ms = policy.delay.as_millis() as u64,
        "bootstrap=start"
    );

    let db = retry_connection(
        || {
            let mut opt = ConnectOptions::new(url);
            opt.min_connections(1)
                .max_connections(10)
                .acquire_timeout(Duration::from_secs(5))
                .sqlx_logging(false);

            async move {
                let db = Database::connect(opt)
                    .await
                    .map_err(|e| AppError::config(format!("failed to connect: {e}")))?;
                ensure_schema(&db).await?;
                Ok(db)
            }
        },
        policy,
    )
    .await?;

    info!("bootstrap=ready");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use sea_orm::ConnectOptions;

    use super::*;
    use crate::repos;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn retry_returns_on_first_success() {
        let mut calls = 0u32;
        let result = retry_connection(
            || {
                calls += 1;
                async move { Ok::<_, AppError>(42) }
            },
            fast_policy(10),
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn retry_recovers_after_transient_failures() {
        let mut calls = 0u32;
        let result = retry_connection(
            || {
                calls += 1;
                let attempt = calls;
                async move {
                    if attempt < 3 {
                        Err(AppError::config("database not ready"))
                    } else {
                        Ok(attempt)
                    }
                }
            },
            fast_policy(10),
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn retry_exhaustion_reports_last_error() {
        let mut calls = 0u32;
        let result: Result<(), AppError> = retry_connection(
            || {
                calls += 1;
                let attempt = calls;
                async move { Err(AppError::config(format!("attempt {attempt} failed"))) }
            },
            fast_policy(4),
        )
        .await;

        assert_eq!(calls, 4);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("attempt 4 failed"));
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.min_connections(1).max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();

        ensure_schema(&db).await.unwrap();
        ensure_schema(&db).await.unwrap();

        // Table is usable after the second pass.
        let item = repos::items::create(&db, "probe", "schema check")
            .await
            .unwrap();
        assert_eq!(item.name, "probe");
    }
}
