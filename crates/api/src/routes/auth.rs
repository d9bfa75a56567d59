//! Authentication Routes

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Missing or empty fields count as absent, matching the gateway
/// contract's presence check.
fn required(field: Option<String>, message: &str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::BadRequest(message.to_string())),
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let email = required(body.email, "All fields are required")?;
    let password = required(body.password, "All fields are required")?;
    let name = required(body.name, "All fields are required")?;

    if state.repository.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let password_hash = student_auth::hash_password(&password)?;
    let user = state.repository.create_user(&email, &password_hash, &name).await?;
    let token = state.tokens.issue(user.id, &user.email)?;

    info!(user_id = user.id, "registered new user");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "token": token,
            "user": UserDto {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required(body.email, "Email and password are required")?;
    let password = required(body.password, "Email and password are required")?;

    // Unknown user and bad password are indistinguishable to the caller.
    let user = state
        .repository
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if !student_auth::verify_password(&password, &user.password_hash) {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state.tokens.issue(user.id, &user.email)?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": UserDto {
            id: user.id,
            email: user.email,
            name: user.name,
        },
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<UserDto>, ApiError> {
    let user = state
        .repository
        .find_user_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserDto {
        id: user.id,
        email: user.email,
        name: user.name,
    }))
}
