use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::models::account::ApplicantRow;
use crate::models::notification::{NotificationRow, NotificationType};

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub start: String,
    pub all_day: bool,
    pub class_name: String,
    pub extended_props: EventProps,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventProps {
    pub calendar: NotificationType,
    pub description: String,
    pub scheduled_time: String,
    pub recipient_name: String,
}

pub fn event_color(kind: NotificationType) -> &'static str {
    match kind {
        NotificationType::Interview => "danger",
        NotificationType::Meeting => "primary",
        NotificationType::Reminder => "warning",
        NotificationType::General => "success",
    }
}

pub fn calendar_event(notification: &NotificationRow, recipient: Option<&ApplicantRow>) -> CalendarEvent {
    let date = notification.scheduled_date.format("%Y-%m-%d");
    let time = notification
        .scheduled_time
        .as_deref()
        .filter(|t| !t.is_empty());

    let title = notification.title.trim();
    CalendarEvent {
        id: notification.id,
        title: if title.is_empty() {
            "Untitled Event".to_string()
        } else {
            title.to_string()
        },
        start: match time {
            Some(t) => format!("{date}T{t}:00"),
            None => date.to_string(),
        },
        all_day: time.is_none(),
        class_name: format!("fc-bg-{}", event_color(notification.notification_type)),
        extended_props: EventProps {
            calendar: notification.notification_type,
            description: notification.description.clone(),
            scheduled_time: time.unwrap_or_default().to_string(),
            recipient_name: recipient
                .map(ApplicantRow::display_name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Applicant".to_string()),
        },
    }
}

pub fn calendar_events(
    notifications: &[NotificationRow],
    recipients: &HashMap<Uuid, ApplicantRow>,
) -> Vec<CalendarEvent> {
    notifications
        .iter()
        .map(|n| calendar_event(n, recipients.get(&n.target_applicant_id)))
        .collect()
}
