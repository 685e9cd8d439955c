use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::{
    dto::{CategoryEdit, NewCategory, EDIT_REQUIRED},
    repo::Category,
};
use crate::{
    dto::Deleted,
    error::ApiError,
    state::AppState,
    validate::{decode_edit, normalize_name},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/category/all", get(list_categories))
        .route("/category/get/:id", get(get_category))
        .route("/category/add", post(add_category))
        .route("/category/edit", put(edit_category))
        .route("/category/delete/:id", delete(delete_category))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .store
        .list_categories()
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(categories))
}

#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Category>, ApiError> {
    state
        .store
        .get_category(id)
        .await
        .map_err(ApiError::Internal)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("category {id} not found")))
}

#[instrument(skip(state, body))]
pub async fn add_category(
    State(state): State<AppState>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let Json(payload) = body?;
    let category = state
        .store
        .create_category(&normalize_name(&payload.name))
        .await
        .map_err(ApiError::Store)?;
    info!(id = category.id, name = %category.name, "category created");
    Ok(Json(category))
}

#[instrument(skip(state, body))]
pub async fn edit_category(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let Json(body) = body?;
    let edit: CategoryEdit = decode_edit(body, EDIT_REQUIRED)?;
    let category = state
        .store
        .edit_category(edit.id, &normalize_name(&edit.name))
        .await
        .map_err(ApiError::Store)?
        .ok_or_else(|| ApiError::Store(anyhow::anyhow!("category {} not found", edit.id)))?;
    info!(id = category.id, name = %category.name, "category edited");
    Ok(Json(category))
}

#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, ApiError> {
    let count = state
        .store
        .delete_category(id)
        .await
        .map_err(ApiError::Store)?;
    info!(id, count, "category delete");
    Ok(Json(Deleted { count }))
}
