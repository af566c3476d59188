//! Auth API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::common::AppResult;
use crate::core::AppState;
use crate::db::models::CustomerProfile;
use crate::identity::CurrentUser;
use shared::models::{Address, SessionUser};

/// Registration payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub phone: String,
    pub password: String,
    pub name: String,
}

/// Login payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Session response with JWT token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: SessionUser,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<SessionResponse>> {
    let authed = state
        .identity
        .register(&req.phone, &req.password, &req.name)
        .await?;
    Ok(Json(SessionResponse {
        token: authed.token,
        user: authed.profile.session_user(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    let authed = state.identity.login(&req.phone, &req.password).await?;
    Ok(Json(SessionResponse {
        token: authed.token,
        user: authed.profile.session_user(),
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<bool>> {
    state.identity.logout()?;
    Ok(Json(true))
}

/// GET /api/auth/me - authoritative profile from the store
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<CustomerProfile>> {
    let profile = state.identity.profile(&user.id).await?;
    Ok(Json(profile))
}

/// POST /api/auth/addresses
pub async fn add_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(address): Json<Address>,
) -> AppResult<Json<CustomerProfile>> {
    let profile = state.identity.add_address(&user.id, address).await?;
    Ok(Json(profile))
}

/// PUT /api/auth/addresses/:id
pub async fn update_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(address): Json<Address>,
) -> AppResult<Json<CustomerProfile>> {
    let profile = state.identity.update_address(&user.id, &id, address).await?;
    Ok(Json(profile))
}

/// DELETE /api/auth/addresses/:id
pub async fn remove_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<CustomerProfile>> {
    let profile = state.identity.remove_address(&user.id, &id).await?;
    Ok(Json(profile))
}
