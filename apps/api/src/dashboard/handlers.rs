use axum::{extract::State, Json};

use crate::auth::StaffUser;
use crate::dashboard::metrics::{load_dashboard, DashboardMetrics};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    _staff: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardMetrics>, AppError> {
    Ok(Json(load_dashboard(state.store.as_ref()).await?))
}
