use serde::{Deserialize, Serialize};

use super::repo_types::User;
use crate::{categories::Category, exercises::Exercise, records::Record};

/// Request body for `/login` and `/register`.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
        }
    }
}

/// Everything a client needs right after login or registration.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: PublicUser,
    pub records: Vec<Record>,
    pub categories: Vec<Category>,
    pub exercises: Vec<Exercise>,
    pub token: String,
    pub expires_at: i64,
}
