use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key of the single company profile row.
pub const COMPANY_PROFILE_ID: &str = "primary";

pub const DEFAULT_LOGO_URL: &str = "/images/admin/default-company-logo.svg";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyProfileRow {
    pub id: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub registration_date: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub logo_url: String,
    pub last_updated: DateTime<Utc>,
}
