use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    dto::{Credentials, PublicUser, SessionResponse},
    jwt::TokenService,
    password::{hash_password, verify_password},
    repo_types::User,
};
use crate::{error::ApiError, store::Store};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Validates credentials, hashes the password and stores the new user.
pub async fn register_user(store: &dyn Store, creds: Credentials) -> Result<User, ApiError> {
    let username = creds.username.trim().to_string();
    if username.is_empty() {
        return Err(ApiError::Invalid("username is required".into()));
    }
    if creds.password.is_empty() {
        return Err(ApiError::Invalid("password is required".into()));
    }
    let email = creds.email.trim().to_lowercase();
    if !email.is_empty() && !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(ApiError::Invalid("invalid email".into()));
    }

    // argon2 is deliberately slow; keep it off the async workers
    let password = creds.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .map_err(ApiError::Internal)?;

    let user = store
        .create_user(&username, &hash, &email)
        .await
        .map_err(ApiError::Store)?;
    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Looks the user up and checks the password. Unknown user and wrong
/// password produce the same rejection.
pub async fn authenticate(store: &dyn Store, creds: Credentials) -> Result<User, ApiError> {
    let username = creds.username.trim();
    let user = store
        .find_user_by_username(username)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            warn!(%username, "login unknown username");
            ApiError::unauthorized("invalid credentials")
        })?;

    let password = creds.password;
    let hash = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .map_err(ApiError::Internal)?;

    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::unauthorized("invalid credentials"));
    }
    info!(user_id = user.id, "user logged in");
    Ok(user)
}

/// Issues a token for `user` and bundles it with the data the client loads
/// on sign-in.
pub async fn open_session(
    store: &dyn Store,
    tokens: &TokenService,
    user: &User,
) -> Result<SessionResponse, ApiError> {
    let issued = tokens
        .issue(user)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let records = store
        .list_records(user.id)
        .await
        .map_err(ApiError::Internal)?;
    let categories = store.list_categories().await.map_err(ApiError::Internal)?;
    let exercises = store.list_exercises().await.map_err(ApiError::Internal)?;

    Ok(SessionResponse {
        user: PublicUser::from(user),
        records,
        categories,
        exercises,
        token: issued.token,
        expires_at: issued.expires_at.unix_timestamp(),
    })
}
