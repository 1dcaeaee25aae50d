use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub file_name: String,
    pub size_bytes: i64,
    pub file_url: String,
    pub storage_path: String,
    pub uploaded_at: DateTime<Utc>,
}
