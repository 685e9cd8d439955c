use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::repo::{NewRecord, Record, RecordEdit, EDIT_REQUIRED};
use crate::{
    auth::extractors::AuthUser, dto::Deleted, error::ApiError, state::AppState,
    validate::decode_edit,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/record/all", get(list_records))
        .route("/record/get/:id", get(get_record))
        .route("/record/add", post(add_record))
        .route("/record/edit", put(edit_record))
        .route("/record/delete/:id", delete(delete_record))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_records(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state
        .store
        .list_records(user.id)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(records))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn get_record(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Record>, ApiError> {
    state
        .store
        .get_record(user.id, id)
        .await
        .map_err(ApiError::Internal)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))
}

#[instrument(skip(state, user, body), fields(user_id = user.id))]
pub async fn add_record(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<NewRecord>, JsonRejection>,
) -> Result<Json<Record>, ApiError> {
    let Json(payload) = body?;
    let record = state
        .store
        .create_record(user.id, &payload)
        .await
        .map_err(ApiError::Store)?;
    info!(id = record.id, exercise_id = record.exercise_id, "record created");
    Ok(Json(record))
}

#[instrument(skip(state, user, body), fields(user_id = user.id))]
pub async fn edit_record(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Record>, ApiError> {
    let Json(body) = body?;
    let edit: RecordEdit = decode_edit(body, EDIT_REQUIRED)?;
    match state.store.edit_record(user.id, &edit).await {
        Ok(Some(record)) => {
            info!(id = record.id, "record edited");
            Ok(Json(record))
        }
        Ok(None) => {
            warn!(id = edit.id, "edit of missing or foreign record");
            Err(ApiError::Store(anyhow::anyhow!("record {} not found", edit.id)))
        }
        Err(e) => Err(ApiError::Store(e)),
    }
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn delete_record(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, ApiError> {
    let count = state
        .store
        .delete_record(user.id, id)
        .await
        .map_err(ApiError::Store)?;
    info!(id, count, "record delete");
    Ok(Json(Deleted { count }))
}
