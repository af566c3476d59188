//! JWT Extractors
//!
//! Handler-level extractors validating the bearer token: [`CurrentUser`]
//! for any authenticated customer, [`AdminUser`] for admin-gated routes.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::common::AppError;
use crate::core::AppState;
use crate::identity::{JwtError, JwtService};

/// The authenticated caller, as carried by the session token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub admin: bool,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("invalid authorization header"))?,
            None => return Err(AppError::Unauthorized),
        };

        match state.jwt().validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser {
                    id: claims.sub,
                    name: claims.name,
                    admin: claims.admin,
                };
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(JwtError::ExpiredToken) => Err(AppError::TokenExpired),
            Err(e) => Err(AppError::invalid_token(e.to_string())),
        }
    }
}

/// An authenticated caller with the admin flag set.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.admin {
            return Err(AppError::forbidden("admin access required"));
        }
        Ok(AdminUser(user))
    }
}
