use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::notification::NotificationType;

const MISSING_FIELDS: &str =
    "All fields (Title, Description, Date, Type) and one applicant must be selected.";

/// Notification form as submitted. Every field is optional here so the
/// missing-field message can be returned instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub notification_type: Option<String>,
    pub target_applicant_id: Option<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidNotification {
    pub title: String,
    pub description: String,
    pub notification_type: NotificationType,
    pub target_applicant_id: Uuid,
    pub scheduled_date: NaiveDate,
    /// Normalised to `HH:MM`. Always `None` for types without a time slot.
    pub scheduled_time: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn validate_draft(draft: &NotificationDraft) -> Result<ValidNotification, AppError> {
    let (Some(title), Some(description), Some(kind), Some(target), Some(date)) = (
        present(&draft.title),
        present(&draft.description),
        present(&draft.notification_type),
        present(&draft.target_applicant_id),
        present(&draft.scheduled_date),
    ) else {
        return Err(AppError::Validation(MISSING_FIELDS.to_string()));
    };

    let notification_type: NotificationType = kind
        .parse()
        .map_err(|_| AppError::Validation(format!("Unknown notification type '{kind}'")))?;

    let scheduled_time = if notification_type.requires_time() {
        let time = present(&draft.scheduled_time).ok_or_else(|| {
            AppError::Validation(format!(
                "The selected notification type ({notification_type}) requires a specific time."
            ))
        })?;
        let parsed = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|_| AppError::Validation(format!("Invalid time '{time}'. Use HH:MM.")))?;
        Some(parsed.format("%H:%M").to_string())
    } else {
        None
    };

    let scheduled_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{date}'. Use YYYY-MM-DD.")))?;

    let target_applicant_id = Uuid::parse_str(target)
        .map_err(|_| AppError::Validation(format!("Invalid applicant id '{target}'")))?;

    Ok(ValidNotification {
        title: title.to_string(),
        description: description.to_string(),
        notification_type,
        target_applicant_id,
        scheduled_date,
        scheduled_time,
    })
}
