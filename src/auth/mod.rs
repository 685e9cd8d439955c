use crate::state::AppState;
use axum::Router;

pub mod claims;
mod dto;
pub mod extractors;
mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;
mod services;

pub use jwt::TokenService;

/// `/login`, `/register`.
pub fn public_router() -> Router<AppState> {
    handlers::auth_routes()
}

/// Routes that need the auth gate in front of them.
pub fn protected_router() -> Router<AppState> {
    handlers::user_routes()
}
