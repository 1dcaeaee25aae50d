pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::accounts::handlers as accounts;
use crate::auth::handlers as auth;
use crate::company::handlers as company;
use crate::dashboard::handlers as dashboard;
use crate::mail::handlers as mail;
use crate::notifications::handlers as notifications;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Body limit for the multipart routes (profile images, logos, résumés).
pub const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signin", post(auth::handle_sign_in))
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/me", get(auth::handle_me))
        .route(
            "/api/v1/auth/password-reset",
            post(auth::handle_password_reset_request),
        )
        .route(
            "/api/v1/auth/password-reset/confirm",
            post(auth::handle_password_reset_confirm),
        )
        // Dashboard + company profile
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route(
            "/api/v1/company",
            get(company::handle_get_company).merge(
                put(company::handle_save_company).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
            ),
        )
        // Applicants
        .route(
            "/api/v1/applicants",
            get(accounts::handle_list_applicants).merge(
                post(accounts::handle_create_account)
                    .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
            ),
        )
        .route("/api/v1/applicants/:id", get(accounts::handle_get_applicant))
        .route(
            "/api/v1/applicants/:id/status",
            patch(accounts::handle_update_status),
        )
        .route(
            "/api/v1/applicants/:id/resumes",
            post(resumes::handle_upload_resume).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Notifications + calendar
        .route(
            "/api/v1/notifications",
            get(notifications::handle_inbox).post(notifications::handle_schedule_notification),
        )
        .route(
            "/api/v1/notifications/recent",
            get(notifications::handle_recent_notifications),
        )
        .route(
            "/api/v1/notifications/:id/read",
            patch(notifications::handle_mark_read),
        )
        .route(
            "/api/v1/calendar/events",
            get(notifications::handle_calendar_events),
        )
        // Résumés + mail
        .route("/api/v1/resumes", get(resumes::handle_list_resumes))
        .route("/api/v1/emails/welcome", post(mail::handle_send_welcome_email))
        .with_state(state)
}
