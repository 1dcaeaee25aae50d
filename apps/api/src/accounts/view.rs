use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::models::account::{ApplicantRow, ApplicantStatus};

pub const DEFAULT_PROFILE_IMAGE: &str = "/images/applicants/default-user.jpg";
const NOT_AVAILABLE: &str = "N/A";

/// Colour of the status badge in the applicant table.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Success,
    Primary,
    Error,
}

impl From<ApplicantStatus> for BadgeColor {
    fn from(status: ApplicantStatus) -> Self {
        match status {
            ApplicantStatus::Success => BadgeColor::Success,
            ApplicantStatus::Pending => BadgeColor::Primary,
            ApplicantStatus::Failed => BadgeColor::Error,
        }
    }
}

/// One row of the applicant table.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantTableRow {
    pub id: Uuid,
    pub name: String,
    pub role: &'static str,
    pub image: String,
    pub phone: String,
    pub email: String,
    pub status: ApplicantStatus,
    pub badge: BadgeColor,
    pub age: u32,
    pub gender: String,
    pub full_address: String,
}

impl ApplicantTableRow {
    pub fn new(applicant: &ApplicantRow, today: NaiveDate) -> Self {
        Self {
            id: applicant.id,
            name: applicant.display_name(),
            role: "Applicant",
            image: applicant
                .profile_image_url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string()),
            phone: or_na(applicant.phone.as_deref()),
            email: or_na(Some(&applicant.email)),
            status: applicant.status,
            badge: applicant.status.into(),
            age: applicant.birth_date.map_or(0, |b| age_on(b, today)),
            gender: or_na(applicant.gender.as_deref()),
            full_address: full_address(applicant),
        }
    }
}

/// Read-only detail of one applicant.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantDetail {
    #[serde(flatten)]
    pub applicant: ApplicantRow,
    pub name: String,
    pub age: u32,
    pub full_address: String,
    pub badge: BadgeColor,
}

impl ApplicantDetail {
    pub fn new(applicant: ApplicantRow, today: NaiveDate) -> Self {
        Self {
            name: applicant.display_name(),
            age: applicant.birth_date.map_or(0, |b| age_on(b, today)),
            full_address: full_address(&applicant),
            badge: applicant.status.into(),
            applicant,
        }
    }
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Whole years between `birth` and `today`. Never negative.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Non-empty parts of street, city and country joined with `", "`.
pub fn full_address(applicant: &ApplicantRow) -> String {
    let parts: Vec<&str> = [&applicant.street, &applicant.city, &applicant.country]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}
