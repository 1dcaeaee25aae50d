use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::format::{long_date, time_ago, truncate, TimeAgoStyle};
use crate::models::account::ApplicantRow;
use crate::models::notification::{NotificationRow, NotificationType};

pub const INBOX_DEFAULT_LIMIT: i64 = 20;
pub const INBOX_MAX_LIMIT: i64 = 100;
pub const DROPDOWN_LIMIT: i64 = 5;
const DROPDOWN_DESCRIPTION_CHARS: usize = 30;

pub fn inbox_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(INBOX_DEFAULT_LIMIT)
        .clamp(1, INBOX_MAX_LIMIT)
}

#[derive(Debug, Clone, Serialize)]
pub struct InboxItem {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: &'static str,
    pub time: String,
    pub read: bool,
    pub scheduled_date: String,
    pub recipient_name: String,
    pub recipient_email: String,
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

pub fn inbox_item(
    notification: &NotificationRow,
    recipient: Option<&ApplicantRow>,
    now: DateTime<Utc>,
) -> InboxItem {
    let title = non_blank(&notification.title);
    let recipient_name = recipient
        .map(ApplicantRow::display_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "N/A".to_string());

    InboxItem {
        id: notification.id,
        name: title.unwrap_or("New Notification").to_string(),
        title: title.unwrap_or("No Title").to_string(),
        description: non_blank(&notification.description)
            .unwrap_or("No description provided.")
            .to_string(),
        category: "Notification",
        time: time_ago(notification.created_at, now, TimeAgoStyle::Long),
        read: notification.read,
        scheduled_date: long_date(&notification.scheduled_date),
        recipient_name,
        recipient_email: recipient
            .and_then(|r| non_blank(&r.email))
            .unwrap_or("N/A")
            .to_string(),
    }
}

pub fn inbox(
    notifications: &[NotificationRow],
    recipients: &HashMap<Uuid, ApplicantRow>,
    now: DateTime<Utc>,
) -> Vec<InboxItem> {
    notifications
        .iter()
        .map(|n| inbox_item(n, recipients.get(&n.target_applicant_id), now))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DropdownItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: NotificationType,
    pub time: String,
    pub read: bool,
}

/// Header dropdown: the latest notifications and whether any is unread.
#[derive(Debug, Clone, Serialize)]
pub struct DropdownResponse {
    pub notifying: bool,
    pub items: Vec<DropdownItem>,
}

pub fn dropdown(notifications: &[NotificationRow], now: DateTime<Utc>) -> DropdownResponse {
    let items: Vec<DropdownItem> = notifications
        .iter()
        .take(DROPDOWN_LIMIT as usize)
        .map(|n| DropdownItem {
            id: n.id,
            title: non_blank(&n.title).unwrap_or("No Title").to_string(),
            description: truncate(&n.description, DROPDOWN_DESCRIPTION_CHARS),
            category: n.notification_type,
            time: time_ago(n.created_at, now, TimeAgoStyle::Compact),
            read: n.read,
        })
        .collect();

    DropdownResponse {
        notifying: items.iter().any(|i| !i.read),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::ApplicantStatus;
    use crate::test_support::{applicant, notification};
    use chrono::Duration;

    #[test]
    fn test_inbox_limit_is_clamped() {
        assert_eq!(inbox_limit(None), 20);
        assert_eq!(inbox_limit(Some(500)), 100);
        assert_eq!(inbox_limit(Some(0)), 1);
    }

    #[test]
    fn test_inbox_item_with_recipient() {
        let (_, ana) = applicant("Ana", Some("Reyes"), ApplicantStatus::Pending);
        let mut n = notification(ana.id, NotificationType::Interview, Some("10:00"));
        let now = n.created_at + Duration::minutes(3);
        n.read = true;

        let item = inbox_item(&n, Some(&ana), now);
        assert_eq!(item.name, n.title);
        assert_eq!(item.category, "Notification");
        assert_eq!(item.time, "3 minutes ago");
        assert_eq!(item.scheduled_date, "November 20, 2025");
        assert_eq!(item.recipient_name, "Ana Reyes");
        assert_eq!(item.recipient_email, ana.email);
        assert!(item.read);
    }

    #[test]
    fn test_inbox_item_fallbacks() {
        let mut n = notification(Uuid::new_v4(), NotificationType::General, None);
        n.title = String::new();
        n.description = " ".to_string();

        let item = inbox_item(&n, None, n.created_at);
        assert_eq!(item.name, "New Notification");
        assert_eq!(item.title, "No Title");
        assert_eq!(item.description, "No description provided.");
        assert_eq!(item.recipient_name, "N/A");
        assert_eq!(item.recipient_email, "N/A");
    }

    #[test]
    fn test_dropdown_truncates_and_flags_unread() {
        let target = Uuid::new_v4();
        let mut read = notification(target, NotificationType::Meeting, Some("09:00"));
        read.read = true;
        read.description = "x".repeat(40);
        let now = read.created_at + Duration::hours(2);

        let response = dropdown(std::slice::from_ref(&read), now);
        assert!(!response.notifying);
        assert_eq!(response.items[0].description, format!("{}...", "x".repeat(30)));
        assert_eq!(response.items[0].category, NotificationType::Meeting);
        assert_eq!(response.items[0].time, "2 hr ago");

        let unread = notification(target, NotificationType::General, None);
        assert!(dropdown(&[read, unread], now).notifying);
    }

    #[test]
    fn test_dropdown_keeps_latest_five() {
        let target = Uuid::new_v4();
        let rows: Vec<_> = (0..7)
            .map(|_| notification(target, NotificationType::Reminder, None))
            .collect();
        assert_eq!(dropdown(&rows, Utc::now()).items.len(), 5);
    }
}
