use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::repos::items;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

async fn create_item(
    app_state: web::Data<AppState>,
    body: web::Json<ItemPayload>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();

    let item = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            items::create(txn, &payload.name, &payload.description)
                .await
                .map_err(|e| {
                    error!(error = %e, "error creating item");
                    AppError::db("Error creating item")
                })
        })
    })
    .await?;

    info!(item_id = item.id, "created item");
    Ok(HttpResponse::Created().json(item))
}

async fn list_items(
    app_state: web::Data<AppState>,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let items = items::list(&app_state.db, params.skip, params.limit)
        .await
        .map_err(|e| {
            error!(error = %e, "error fetching items");
            AppError::db("Error fetching items")
        })?;

    Ok(HttpResponse::Ok().json(items))
}

async fn get_item(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let item = items::find_by_id(&app_state.db, id)
        .await
        .map_err(|e| {
            error!(item_id = id, error = %e, "error fetching item");
            AppError::db("Error fetching item")
        })?
        .ok_or_else(|| AppError::not_found("Item not found"))?;

    Ok(HttpResponse::Ok().json(item))
}

async fn update_item(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<ItemPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payload = body.into_inner();

    // NotFound is raised inside the closure and passes through the rollback
    // path untouched; only storage failures map to the generic 500.
    let item = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            items::update(txn, id, &payload.name, &payload.description)
                .await
                .map_err(|e| {
                    error!(item_id = id, error = %e, "error updating item");
                    AppError::db("Error updating item")
                })?
                .ok_or_else(|| AppError::not_found("Item not found"))
        })
    })
    .await?;

    info!(item_id = id, "updated item");
    Ok(HttpResponse::Ok().json(item))
}

async fn delete_item(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            let removed = items::delete(txn, id).await.map_err(|e| {
                error!(item_id = id, error = %e, "error deleting item");
                AppError::db("Error deleting item")
            })?;

            if removed {
                Ok(())
            } else {
                Err(AppError::not_found("Item not found"))
            }
        })
    })
    .await?;

    info!(item_id = id, "deleted item");
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_item))
            .route(web::get().to(list_items)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_item))
            .route(web::put().to(update_item))
            .route(web::delete().to(delete_item)),
    );
}
