//! Unified Error Handling
//!
//! Application-wide error taxonomy and the JSON error envelope returned by
//! the HTTP surface. Repository and service methods return [`AppResult`] and
//! propagate with `?`; handlers convert automatically via `IntoResponse`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Unified API error envelope
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication Errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Profile missing for identity {0}")]
    ProfileMissing(String),

    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient stock for product {product_id} size {size}")]
    InsufficientStock { product_id: String, size: String },

    #[error("Order creation failed: {0}")]
    OrderCreation(String),

    // ========== System Errors ==========
    #[error("Store error: {0}")]
    Remote(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn insufficient_stock(product_id: impl Into<String>, size: impl Into<String>) -> Self {
        Self::InsufficientStock {
            product_id: product_id.into(),
            size: size.into(),
        }
    }

    pub fn profile_missing(identity: impl Into<String>) -> Self {
        Self::ProfileMissing(identity.into())
    }

    pub fn order_creation(msg: impl Into<String>) -> Self {
        Self::OrderCreation(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Stable error code, also used by clients to branch on failure kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "E1000",
            Self::Auth(_) => "E1001",
            Self::InvalidToken(_) => "E1002",
            Self::TokenExpired => "E1003",
            Self::ProfileMissing(_) => "E1004",
            Self::Forbidden(_) => "E2001",
            Self::Validation(_) => "E0002",
            Self::NotFound(_) => "E0003",
            Self::InsufficientStock { .. } => "E6001",
            Self::OrderCreation(_) => "E4001",
            Self::Remote(_) => "E9002",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized
            | AppError::Auth(_)
            | AppError::InvalidToken(_)
            | AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::ProfileMissing(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientStock { .. } => StatusCode::CONFLICT,
            AppError::OrderCreation(_) | AppError::Remote(_) => {
                error!(target: "store", error = %self, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(AppResponse::<()> {
            code: self.code().to_string(),
            message: self.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Conversions from storage errors ==========

impl From<surrealdb::Error> for AppError {
    fn from(err: surrealdb::Error) -> Self {
        AppError::Remote(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Remote(format!("serialization: {err}"))
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(err: redb::DatabaseError) -> Self {
        AppError::Remote(err.to_string())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(err: redb::TransactionError) -> Self {
        AppError::Remote(err.to_string())
    }
}

impl From<redb::TableError> for AppError {
    fn from(err: redb::TableError) -> Self {
        AppError::Remote(err.to_string())
    }
}

impl From<redb::StorageError> for AppError {
    fn from(err: redb::StorageError) -> Self {
        AppError::Remote(err.to_string())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(err: redb::CommitError) -> Self {
        AppError::Remote(err.to_string())
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Create a successful response envelope
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}
