use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::account::UnknownValue;

/// Status written on every new notification.
pub const SCHEDULED: &str = "scheduled";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationType {
    Interview,
    Meeting,
    Reminder,
    General,
}

impl NotificationType {
    pub const ALL: [NotificationType; 4] = [
        NotificationType::Interview,
        NotificationType::Meeting,
        NotificationType::Reminder,
        NotificationType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Interview => "Interview",
            NotificationType::Meeting => "Meeting",
            NotificationType::Reminder => "Reminder",
            NotificationType::General => "General",
        }
    }

    /// Live sessions need a time slot in addition to the date.
    pub fn requires_time(&self) -> bool {
        matches!(self, NotificationType::Interview | NotificationType::Meeting)
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

impl TryFrom<String> for NotificationType {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub notification_type: NotificationType,
    pub target_applicant_id: Uuid,
    pub scheduled_date: NaiveDate,
    /// `HH:MM`, only present for live-session types.
    pub scheduled_time: Option<String>,
    pub status: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
