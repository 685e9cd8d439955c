use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    auth::{
        dto::{Credentials, PublicUser, SessionResponse},
        extractors::AuthUser,
        services::{authenticate, open_session, register_user},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user", get(get_user))
}

#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(creds) = body?;
    let user = register_user(state.store.as_ref(), creds).await?;
    let session = open_session(state.store.as_ref(), &state.tokens, &user).await?;
    Ok(Json(session))
}

#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(creds) = body?;
    let user = authenticate(state.store.as_ref(), creds).await?;
    let session = open_session(state.store.as_ref(), &state.tokens, &user).await?;
    Ok(Json(session))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let found = state
        .store
        .find_user_by_id(user.id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            error!(user_id = user.id, "token for unknown user");
            ApiError::unauthorized("user not found")
        })?;
    Ok(Json(PublicUser::from(&found)))
}
