use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden")]
    Forbidden,

    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Weak password")]
    WeakPassword,

    #[error("Request body too large")]
    PayloadTooLarge,

    /// Image host rejected or failed the upload; carries the user-facing message.
    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Forbidden => "FORBIDDEN",
            AppError::EmailAlreadyInUse => "EMAIL_ALREADY_IN_USE",
            AppError::WeakPassword => "WEAK_PASSWORD",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::Upload(_) => "UPLOAD_ERROR",
            AppError::Mail(_) => "MAIL_ERROR",
            AppError::S3(_) => "S3_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Redis(_) => "CACHE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message shown to the dashboard user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Upload(msg) => {
                msg.clone()
            }
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::InvalidCredentials => "Invalid email or password.".to_string(),
            AppError::Forbidden => "Access denied".to_string(),
            AppError::EmailAlreadyInUse => "This email is already registered.".to_string(),
            AppError::WeakPassword => "Password must be at least 6 characters.".to_string(),
            AppError::PayloadTooLarge => format!(
                "Uploads are limited to {} MB.",
                crate::routes::UPLOAD_BODY_LIMIT / (1024 * 1024)
            ),
            AppError::Mail(_) => "Failed to send welcome email due to server error.".to_string(),
            AppError::S3(_) => "A storage error occurred".to_string(),
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Redis(_) => "A cache error occurred".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::WeakPassword => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::EmailAlreadyInUse => StatusCode::CONFLICT,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upload(_) | AppError::S3(_) => StatusCode::BAD_GATEWAY,
            AppError::Mail(_)
            | AppError::Database(_)
            | AppError::Redis(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upload(msg) => tracing::warn!("Image upload error: {msg}"),
            AppError::Mail(msg) => tracing::error!("Mail relay error: {msg}"),
            AppError::S3(msg) => tracing::error!("S3 error: {msg}"),
            AppError::Database(e) => tracing::error!("Database error: {e}"),
            AppError::Redis(e) => tracing::error!("Redis error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        let status = self.status();
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.user_message()
            }
        }));

        (status, body).into_response()
    }
}
