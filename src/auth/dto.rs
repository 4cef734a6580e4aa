use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::claims::Role;
use crate::auth::jwt::TokenPair;
use crate::auth::repo::User;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    /// Optional role names; "admin" is recognised, anything else maps to the
    /// ordinary user role.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            roles: u.roles,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, user: User) -> Self {
        Self {
            access_token: tokens.access,
            refresh_token: tokens.refresh,
            user: user.into(),
        }
    }
}
