use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::service::{create_account, parse_status, update_status, NewAccount};
use crate::accounts::view::{ApplicantDetail, ApplicantTableRow, BadgeColor};
use crate::auth::StaffUser;
use crate::errors::AppError;
use crate::models::account::ApplicantRow;
use crate::multipart::FormData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplicantListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    pub message: &'static str,
    pub applicant: ApplicantRow,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub applicant: ApplicantRow,
    pub changed: bool,
    pub badge: BadgeColor,
}

/// POST /api/v1/applicants
pub async fn handle_create_account(
    _staff: StaffUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreateAccountResponse>), AppError> {
    let mut form = FormData::read(multipart).await?;
    let profile_image = form.take_file("profile_image").map(Into::into);

    let applicant = create_account(
        state.store.as_ref(),
        state.images.as_ref(),
        &state.config.image_preset_applicant,
        NewAccount::from_form(&form),
        profile_image,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAccountResponse {
            message: "New account created successfully!",
            applicant,
        }),
    ))
}

/// GET /api/v1/applicants
pub async fn handle_list_applicants(
    _staff: StaffUser,
    State(state): State<AppState>,
    Query(params): Query<ApplicantListQuery>,
) -> Result<Json<Vec<ApplicantTableRow>>, AppError> {
    let status = params.status.as_deref().map(parse_status).transpose()?;
    let today = Utc::now().date_naive();
    let rows = state.store.list_applicants(status).await?;
    Ok(Json(
        rows.iter()
            .map(|row| ApplicantTableRow::new(row, today))
            .collect(),
    ))
}

/// GET /api/v1/applicants/:id
pub async fn handle_get_applicant(
    _staff: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicantDetail>, AppError> {
    let applicant = state
        .store
        .get_applicant(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Applicant {id} not found")))?;
    Ok(Json(ApplicantDetail::new(applicant, Utc::now().date_naive())))
}

/// PATCH /api/v1/applicants/:id/status
pub async fn handle_update_status(
    _staff: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let change = update_status(state.store.as_ref(), id, &req.status).await?;
    Ok(Json(StatusUpdateResponse {
        badge: change.applicant.status.into(),
        applicant: change.applicant,
        changed: change.changed,
    }))
}
