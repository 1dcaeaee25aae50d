use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::{create_staff_credential, normalize_email, password};
use crate::errors::AppError;
use crate::mail::password_reset_email;
use crate::models::account::Role;
use crate::state::AppState;

pub const RESET_SENT_MESSAGE: &str = "Password reset email sent! Check your inbox.";

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: PrincipalResponse,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirm {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    let email = normalize_email(&req.email);
    let credential = state
        .store
        .find_credential_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let valid =
        password::verify_password_blocking(req.password, credential.password_hash.clone()).await?;
    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    let access_token = state
        .tokens
        .issue(credential.id, &credential.email, credential.role)
        .map_err(|e| AppError::Internal(e.into()))?;

    info!(user_id = %credential.id, role = credential.role.as_str(), "signed in");
    Ok(Json(SignInResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.tokens.ttl_secs(),
        user: PrincipalResponse {
            id: credential.id,
            email: credential.email,
            role: credential.role,
        },
    }))
}

/// GET /api/v1/auth/me
pub async fn handle_me(user: AuthUser) -> Json<PrincipalResponse> {
    Json(PrincipalResponse {
        id: user.id,
        email: user.email,
        role: user.role,
    })
}

/// POST /api/v1/auth/signup. Creates a staff account when enabled in config.
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<PrincipalResponse>), AppError> {
    if !state.config.allow_staff_signup {
        return Err(AppError::Forbidden);
    }
    let credential = create_staff_credential(state.store.as_ref(), &req.email, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(PrincipalResponse {
            id: credential.id,
            email: credential.email,
            role: credential.role,
        }),
    ))
}

/// POST /api/v1/auth/password-reset
///
/// Answers the same way whether or not the account exists.
pub async fn handle_password_reset_request(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() {
        return Err(AppError::Validation("Email is required.".to_string()));
    }

    if let Some(credential) = state.store.find_credential_by_email(&email).await? {
        let token = state.reset_tokens.issue(credential.id).await?;
        let link = format!("{}?token={}", state.config.password_reset_url, token);
        if let Err(e) = state
            .mailer
            .send(password_reset_email(&credential.email, &link))
            .await
        {
            warn!(user_id = %credential.id, "failed to send reset email: {e}");
        }
    }

    Ok(Json(MessageResponse {
        message: RESET_SENT_MESSAGE.to_string(),
    }))
}

/// POST /api/v1/auth/password-reset/confirm
pub async fn handle_password_reset_confirm(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetConfirm>,
) -> Result<Json<MessageResponse>, AppError> {
    password::validate_password(&req.new_password)?;

    let invalid =
        || AppError::Validation("Password reset link is invalid or has expired.".to_string());

    let credential_id = state
        .reset_tokens
        .consume(req.token.trim())
        .await?
        .ok_or_else(invalid)?;
    let credential = state
        .store
        .find_credential(credential_id)
        .await?
        .ok_or_else(invalid)?;

    let hash = password::hash_password_blocking(req.new_password).await?;
    state
        .store
        .update_password_hash(credential.id, &hash, Utc::now())
        .await?;

    info!(user_id = %credential.id, "password reset");
    Ok(Json(MessageResponse {
        message: "Password has been reset. You can now sign in.".to_string(),
    }))
}
