use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::mail::welcome_email;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WelcomeEmailRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WelcomeEmailResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/v1/emails/welcome
pub async fn handle_send_welcome_email(
    user: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<WelcomeEmailRequest>,
) -> Result<Json<WelcomeEmailResponse>, AppError> {
    let email = req
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            AppError::Validation("The email field is required in the request data.".to_string())
        })?;

    state
        .mailer
        .send(welcome_email(&email, &state.config.web_app_login_url))
        .await
        .map_err(|e| AppError::Mail(e.to_string()))?;

    info!(requested_by = %user.id, to = %email, "welcome email sent");
    Ok(Json(WelcomeEmailResponse {
        success: true,
        message: "Welcome email sent successfully.".to_string(),
    }))
}
