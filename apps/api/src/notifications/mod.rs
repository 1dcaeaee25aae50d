//! Notifications targeted at one applicant: scheduling, the inbox, the
//! header dropdown and the calendar feed.

pub mod calendar;
pub mod handlers;
pub mod inbox;
pub mod validation;

use std::collections::HashMap;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::ApplicantRow;
use crate::models::notification::{NotificationRow, SCHEDULED};
use crate::store::Store;
use validation::{validate_draft, NotificationDraft};

/// Validates the draft, checks the target exists and inserts the notification.
pub async fn schedule_notification(
    store: &dyn Store,
    draft: &NotificationDraft,
) -> Result<NotificationRow, AppError> {
    let valid = validate_draft(draft)?;

    if store.get_applicant(valid.target_applicant_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Applicant {} not found",
            valid.target_applicant_id
        )));
    }

    let notification = NotificationRow {
        id: Uuid::new_v4(),
        title: valid.title,
        description: valid.description,
        notification_type: valid.notification_type,
        target_applicant_id: valid.target_applicant_id,
        scheduled_date: valid.scheduled_date,
        scheduled_time: valid.scheduled_time,
        status: SCHEDULED.to_string(),
        read: false,
        created_at: Utc::now(),
    };
    store.insert_notification(&notification).await?;

    info!(
        notification_id = %notification.id,
        applicant_id = %notification.target_applicant_id,
        kind = notification.notification_type.as_str(),
        "notification scheduled"
    );
    Ok(notification)
}

/// Looks up the target applicant of each notification.
pub async fn recipients(
    store: &dyn Store,
    notifications: &[NotificationRow],
) -> Result<HashMap<Uuid, ApplicantRow>, AppError> {
    let mut ids: Vec<Uuid> = notifications.iter().map(|n| n.target_applicant_id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(store
        .get_applicants(&ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect())
}
