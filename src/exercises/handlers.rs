use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::{
    dto::{ExerciseEdit, NewExercise, EDIT_REQUIRED},
    repo::Exercise,
};
use crate::{
    dto::Deleted,
    error::ApiError,
    state::AppState,
    validate::{decode_edit, normalize_name},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exercise/all", get(list_exercises))
        .route("/exercise/get/:id", get(get_exercise))
        .route("/exercise/add", post(add_exercise))
        .route("/exercise/edit", put(edit_exercise))
        .route("/exercise/delete/:id", delete(delete_exercise))
}

#[instrument(skip(state))]
pub async fn list_exercises(
    State(state): State<AppState>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let exercises = state
        .store
        .list_exercises()
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(exercises))
}

#[instrument(skip(state))]
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Exercise>, ApiError> {
    match state.store.get_exercise(id).await {
        Ok(Some(exercise)) => Ok(Json(exercise)),
        Ok(None) => Err(ApiError::NotFound(format!("exercise {id} not found"))),
        Err(e) => Err(ApiError::Internal(e)),
    }
}

#[instrument(skip(state, body))]
pub async fn add_exercise(
    State(state): State<AppState>,
    body: Result<Json<NewExercise>, JsonRejection>,
) -> Result<Json<Exercise>, ApiError> {
    let Json(payload) = body?;
    let exercise = state
        .store
        .create_exercise(&normalize_name(&payload.name), payload.category_id)
        .await
        .map_err(ApiError::Store)?;
    info!(id = exercise.id, name = %exercise.name, "exercise created");
    Ok(Json(exercise))
}

#[instrument(skip(state, body))]
pub async fn edit_exercise(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Exercise>, ApiError> {
    let Json(body) = body?;
    let edit: ExerciseEdit = decode_edit(body, EDIT_REQUIRED)?;
    let exercise = state
        .store
        .edit_exercise(edit.id, &normalize_name(&edit.name), edit.category_id)
        .await
        .map_err(ApiError::Store)?
        .ok_or_else(|| ApiError::Store(anyhow::anyhow!("exercise {} not found", edit.id)))?;
    info!(id = exercise.id, "exercise edited");
    Ok(Json(exercise))
}

#[instrument(skip(state))]
pub async fn delete_exercise(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, ApiError> {
    let count = state
        .store
        .delete_exercise(id)
        .await
        .map_err(ApiError::Store)?;
    Ok(Json(Deleted { count }))
}
