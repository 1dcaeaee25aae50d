//! Persistence seam for every collection the dashboard reads and writes.
//!
//! Handlers and services only see `Arc<dyn Store>`; `PgStore` is the
//! production backend and `memory::MemoryStore` backs the test suite.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::{ApplicantRow, ApplicantStatus, CredentialRow};
use crate::models::company::CompanyProfileRow;
use crate::models::notification::NotificationRow;
use crate::models::resume::ResumeRow;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `email` must already be lower-cased.
    async fn find_credential_by_email(&self, email: &str)
        -> Result<Option<CredentialRow>, AppError>;

    async fn find_credential(&self, id: Uuid) -> Result<Option<CredentialRow>, AppError>;

    /// Returns `AppError::EmailAlreadyInUse` when the e-mail is taken.
    async fn insert_credential(&self, credential: &CredentialRow) -> Result<(), AppError>;

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait ApplicantStore: Send + Sync {
    /// Writes the credential and its applicant profile atomically.
    async fn create_applicant_account(
        &self,
        credential: &CredentialRow,
        applicant: &ApplicantRow,
    ) -> Result<(), AppError>;

    async fn list_applicants(
        &self,
        status: Option<ApplicantStatus>,
    ) -> Result<Vec<ApplicantRow>, AppError>;

    async fn get_applicant(&self, id: Uuid) -> Result<Option<ApplicantRow>, AppError>;

    async fn get_applicants(&self, ids: &[Uuid]) -> Result<Vec<ApplicantRow>, AppError>;

    /// Most recently created applicants first.
    async fn recent_applicants(&self, limit: i64) -> Result<Vec<ApplicantRow>, AppError>;

    /// Single-field update. `None` when no applicant has this id.
    async fn update_applicant_status(
        &self,
        id: Uuid,
        status: ApplicantStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<ApplicantRow>, AppError>;
}

/// Filter for notification reads. Results are always newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationQuery {
    pub limit: Option<i64>,
    pub scheduled_from: Option<NaiveDate>,
    pub scheduled_to: Option<NaiveDate>,
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(&self, notification: &NotificationRow) -> Result<(), AppError>;

    async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<Vec<NotificationRow>, AppError>;

    /// Returns `false` when no notification has this id.
    async fn mark_notification_read(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn get_company_profile(&self) -> Result<Option<CompanyProfileRow>, AppError>;

    /// Writes the first profile. A row saved concurrently is overwritten.
    async fn insert_company_profile(&self, profile: &CompanyProfileRow) -> Result<(), AppError>;

    async fn update_company_profile(&self, profile: &CompanyProfileRow) -> Result<(), AppError>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert_resume(&self, resume: &ResumeRow) -> Result<(), AppError>;

    /// Newest upload first.
    async fn list_resumes(&self) -> Result<Vec<ResumeRow>, AppError>;
}

/// Everything the API needs from persistence.
pub trait Store:
    CredentialStore + ApplicantStore + NotificationStore + CompanyStore + ResumeStore
{
}

impl<T> Store for T where
    T: CredentialStore + ApplicantStore + NotificationStore + CompanyStore + ResumeStore
{
}
