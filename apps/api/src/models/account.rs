use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Staff,
    Applicant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Applicant => "applicant",
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "staff" => Ok(Role::Staff),
            "applicant" => Ok(Role::Applicant),
            _ => Err(UnknownValue(value)),
        }
    }
}

/// Hiring pipeline status. Stored and serialized exactly as `Pending`, `Success`, `Failed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ApplicantStatus {
    Pending,
    Success,
    Failed,
}

impl ApplicantStatus {
    pub const ALL: [ApplicantStatus; 3] = [
        ApplicantStatus::Pending,
        ApplicantStatus::Success,
        ApplicantStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "Pending",
            ApplicantStatus::Success => "Success",
            ApplicantStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for ApplicantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicantStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicantStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

impl TryFrom<String> for ApplicantStatus {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A stored enum column held a value this build does not know about.
#[derive(Debug, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownValue(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CredentialRow {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantRow {
    /// Same id as the applicant's credential.
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ApplicantStatus,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ApplicantRow {
    pub fn display_name(&self) -> String {
        display_name(Some(&self.first_name), self.last_name.as_deref())
    }
}

/// `"{first} {last}"` with missing parts treated as empty, trimmed.
pub fn display_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string()
}
