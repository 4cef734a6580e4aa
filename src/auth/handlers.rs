use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        claims::Role,
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, SignupRequest},
        extractors::AuthUser,
        jwt::{JwtKeys, TokenPair},
        password::{hash_password, verify_password},
        repo,
    },
    error::{is_unique_violation, ApiError},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{3,32}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

fn roles_from_request(requested: Option<Vec<String>>) -> Vec<Role> {
    let mut roles = match requested {
        None => vec![Role::User],
        Some(names) => names
            .iter()
            .map(|name| match name.as_str() {
                "admin" => Role::Admin,
                _ => Role::User,
            })
            .collect(),
    };
    roles.sort_by_key(|r| matches!(r, Role::Admin));
    roles.dedup();
    if roles.is_empty() {
        roles.push(Role::User);
    }
    roles
}

fn issue_pair(keys: &JwtKeys, user: &repo::User) -> Result<TokenPair, ApiError> {
    keys.pair(user.id, &user.roles).map_err(|e| {
        error!(error = %e, user_id = %user.id, "token issue failed");
        ApiError::Internal(e)
    })
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.username = payload.username.trim().to_string();

    if !is_valid_username(&payload.username) {
        warn!(username = %payload.username, "invalid username");
        return Err(ApiError::Validation(
            "Username must be 3-32 characters (letters, digits, underscore)".into(),
        ));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    if repo::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already taken");
        return Err(ApiError::Conflict("Username already taken".into()));
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Internal(e)
    })?;

    let roles = roles_from_request(payload.roles.take());
    let user = match repo::create(&state.db, &payload.username, &hash, &roles).await {
        Ok(u) => u,
        // Lost the race against a concurrent signup for the same name
        Err(e) if is_unique_violation(&e) => {
            warn!(username = %payload.username, "username already taken");
            return Err(ApiError::Conflict("Username already taken".into()));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(e.into());
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let tokens = issue_pair(&keys, &user)?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Json(AuthResponse::new(tokens, user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = match repo::find_by_username(&state.db, payload.username.trim()).await? {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify_password failed");
        ApiError::Internal(e)
    })?;

    if !ok {
        warn!(username = %user.username, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let tokens = issue_pair(&keys, &user)?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(AuthResponse::new(tokens, user)))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    // Re-read the user so a fresh pair reflects current roles
    let user = repo::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;

    let tokens = issue_pair(&keys, &user)?;
    Ok(Json(AuthResponse::new(tokens, user)))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = repo::find_by_id(&state.db, caller.id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %caller.id, "token for missing user");
            ApiError::Unauthorized("User not found".into())
        })?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_validation() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("alice_42"));
        assert!(!is_valid_username("al"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(""));
    }

    #[test]
    fn role_names_map_to_roles() {
        assert_eq!(roles_from_request(None), vec![Role::User]);
        assert_eq!(
            roles_from_request(Some(vec!["admin".into()])),
            vec![Role::Admin]
        );
        assert_eq!(
            roles_from_request(Some(vec!["admin".into(), "user".into()])),
            vec![Role::User, Role::Admin]
        );
        // unknown names fall back to the ordinary role
        assert_eq!(
            roles_from_request(Some(vec!["moderator".into()])),
            vec![Role::User]
        );
    }
}
