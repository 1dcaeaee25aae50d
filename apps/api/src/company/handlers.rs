use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::auth::StaffUser;
use crate::company::profile::{
    load_profile, save_profile, CompanyFields, CompanyProfileView, SaveOutcome,
};
use crate::errors::AppError;
use crate::models::company::CompanyProfileRow;
use crate::multipart::FormData;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub message: &'static str,
    pub outcome: SaveOutcome,
    pub profile: CompanyProfileRow,
}

/// GET /api/v1/company
pub async fn handle_get_company(
    _staff: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<CompanyProfileView>, AppError> {
    Ok(Json(load_profile(state.store.as_ref()).await?))
}

/// PUT /api/v1/company
pub async fn handle_save_company(
    _staff: StaffUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SaveProfileResponse>, AppError> {
    let mut form = FormData::read(multipart).await?;
    let logo = form.take_file("logo").map(Into::into);

    let (profile, outcome) = save_profile(
        state.store.as_ref(),
        state.images.as_ref(),
        &state.config.image_preset_company,
        CompanyFields::from_form(&form),
        logo,
    )
    .await?;

    Ok(Json(SaveProfileResponse {
        message: outcome.message(),
        outcome,
        profile,
    }))
}
