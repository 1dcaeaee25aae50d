use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::StaffUser;
use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::notifications::calendar::{calendar_events, CalendarEvent};
use crate::notifications::inbox::{
    dropdown, inbox, inbox_limit, DropdownResponse, InboxItem, DROPDOWN_LIMIT,
};
use crate::notifications::validation::NotificationDraft;
use crate::notifications::{recipients, schedule_notification};
use crate::state::AppState;
use crate::store::NotificationQuery;

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub message: String,
    pub notification: NotificationRow,
}

#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub id: Uuid,
    pub read: bool,
}

/// POST /api/v1/notifications
pub async fn handle_schedule_notification(
    _staff: StaffUser,
    State(state): State<AppState>,
    Json(draft): Json<NotificationDraft>,
) -> Result<(StatusCode, Json<ScheduleResponse>), AppError> {
    let notification = schedule_notification(state.store.as_ref(), &draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ScheduleResponse {
            message: format!(
                "Notification created and scheduled for applicant UID: {}",
                notification.target_applicant_id
            ),
            notification,
        }),
    ))
}

/// GET /api/v1/notifications
pub async fn handle_inbox(
    _staff: StaffUser,
    State(state): State<AppState>,
    Query(params): Query<InboxQuery>,
) -> Result<Json<Vec<InboxItem>>, AppError> {
    let rows = state
        .store
        .list_notifications(&NotificationQuery {
            limit: Some(inbox_limit(params.limit)),
            ..Default::default()
        })
        .await?;
    let recipients = recipients(state.store.as_ref(), &rows).await?;
    Ok(Json(inbox(&rows, &recipients, Utc::now())))
}

/// GET /api/v1/notifications/recent
pub async fn handle_recent_notifications(
    _staff: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<DropdownResponse>, AppError> {
    let rows = state
        .store
        .list_notifications(&NotificationQuery {
            limit: Some(DROPDOWN_LIMIT),
            ..Default::default()
        })
        .await?;
    Ok(Json(dropdown(&rows, Utc::now())))
}

/// PATCH /api/v1/notifications/:id/read
pub async fn handle_mark_read(
    _staff: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MarkReadResponse>, AppError> {
    if !state.store.mark_notification_read(id).await? {
        return Err(AppError::NotFound(format!("Notification {id} not found")));
    }
    Ok(Json(MarkReadResponse { id, read: true }))
}

fn parse_day(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .map_err(|_| AppError::Validation(format!("'{field}' must be a YYYY-MM-DD date")))
        })
        .transpose()
}

/// GET /api/v1/calendar/events
pub async fn handle_calendar_events(
    _staff: StaffUser,
    State(state): State<AppState>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let query = NotificationQuery {
        limit: None,
        scheduled_from: parse_day(params.from.as_deref(), "from")?,
        scheduled_to: parse_day(params.to.as_deref(), "to")?,
    };
    let rows = state.store.list_notifications(&query).await?;
    let recipients = recipients(state.store.as_ref(), &rows).await?;
    Ok(Json(calendar_events(&rows, &recipients)))
}
