use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::{AuthUser, StaffUser};
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::multipart::FormData;
use crate::resumes::listing::{load_resume_groups, ResumeGroup};
use crate::resumes::upload::upload_resume;
use crate::state::AppState;

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    _staff: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeGroup>>, AppError> {
    Ok(Json(load_resume_groups(state.store.as_ref()).await?))
}

/// POST /api/v1/applicants/:id/resumes
pub async fn handle_upload_resume(
    user: AuthUser,
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let mut form = FormData::read(multipart).await?;
    let file = form
        .take_file("file")
        .ok_or_else(|| AppError::Validation("A résumé file is required.".to_string()))?;

    let row = upload_resume(
        state.store.as_ref(),
        state.files.as_ref(),
        &user,
        owner_id,
        file,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}
