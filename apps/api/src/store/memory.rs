use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::{ApplicantRow, ApplicantStatus, CredentialRow};
use crate::models::company::CompanyProfileRow;
use crate::models::notification::NotificationRow;
use crate::models::resume::ResumeRow;
use crate::store::{
    ApplicantStore, CompanyStore, CredentialStore, NotificationQuery, NotificationStore,
    ResumeStore,
};

#[derive(Default)]
struct Tables {
    credentials: Vec<CredentialRow>,
    applicants: Vec<ApplicantRow>,
    notifications: Vec<NotificationRow>,
    company: Option<CompanyProfileRow>,
    resumes: Vec<ResumeRow>,
    company_inserts: usize,
    company_updates: usize,
}

/// In-memory store with the same observable semantics as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applicants(&self) -> Vec<ApplicantRow> {
        self.tables.lock().unwrap().applicants.clone()
    }

    pub fn credentials(&self) -> Vec<CredentialRow> {
        self.tables.lock().unwrap().credentials.clone()
    }

    pub fn notifications(&self) -> Vec<NotificationRow> {
        self.tables.lock().unwrap().notifications.clone()
    }

    pub fn resumes(&self) -> Vec<ResumeRow> {
        self.tables.lock().unwrap().resumes.clone()
    }

    /// (inserts, updates) performed on the company profile row.
    pub fn company_writes(&self) -> (usize, usize) {
        let tables = self.tables.lock().unwrap();
        (tables.company_inserts, tables.company_updates)
    }

    pub fn seed_applicant(&self, credential: CredentialRow, applicant: ApplicantRow) {
        let mut tables = self.tables.lock().unwrap();
        tables.credentials.push(credential);
        tables.applicants.push(applicant);
    }

    pub fn seed_notification(&self, notification: NotificationRow) {
        self.tables.lock().unwrap().notifications.push(notification);
    }

    pub fn seed_resume(&self, resume: ResumeRow) {
        self.tables.lock().unwrap().resumes.push(resume);
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.credentials.iter().find(|c| c.email == email).cloned())
    }

    async fn find_credential(&self, id: Uuid) -> Result<Option<CredentialRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.credentials.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_credential(&self, credential: &CredentialRow) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.credentials.iter().any(|c| c.email == credential.email) {
            return Err(AppError::EmailAlreadyInUse);
        }
        tables.credentials.push(credential.clone());
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(c) = tables.credentials.iter_mut().find(|c| c.id == id) {
            c.password_hash = password_hash.to_string();
            c.updated_at = at;
        }
        Ok(())
    }
}

#[async_trait]
impl ApplicantStore for MemoryStore {
    async fn create_applicant_account(
        &self,
        credential: &CredentialRow,
        applicant: &ApplicantRow,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.credentials.iter().any(|c| c.email == credential.email) {
            return Err(AppError::EmailAlreadyInUse);
        }
        tables.credentials.push(credential.clone());
        tables.applicants.push(applicant.clone());
        Ok(())
    }

    async fn list_applicants(
        &self,
        status: Option<ApplicantStatus>,
    ) -> Result<Vec<ApplicantRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<ApplicantRow> = tables
            .applicants
            .iter()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn get_applicant(&self, id: Uuid) -> Result<Option<ApplicantRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.applicants.iter().find(|a| a.id == id).cloned())
    }

    async fn get_applicants(&self, ids: &[Uuid]) -> Result<Vec<ApplicantRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .applicants
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn recent_applicants(&self, limit: i64) -> Result<Vec<ApplicantRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows = tables.applicants.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn update_applicant_status(
        &self,
        id: Uuid,
        status: ApplicantStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<ApplicantRow>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.applicants.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = status;
            a.last_updated = Some(at);
            a.clone()
        }))
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert_notification(&self, notification: &NotificationRow) -> Result<(), AppError> {
        self.tables
            .lock()
            .unwrap()
            .notifications
            .push(notification.clone());
        Ok(())
    }

    async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<Vec<NotificationRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<_> = tables
            .notifications
            .iter()
            .filter(|n| query.scheduled_from.map_or(true, |from| n.scheduled_date >= from))
            .filter(|n| query.scheduled_to.map_or(true, |to| n.scheduled_date <= to))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            rows.truncate(limit.max(0) as usize);
        }
        Ok(rows)
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn get_company_profile(&self) -> Result<Option<CompanyProfileRow>, AppError> {
        Ok(self.tables.lock().unwrap().company.clone())
    }

    async fn insert_company_profile(&self, profile: &CompanyProfileRow) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.company = Some(profile.clone());
        tables.company_inserts += 1;
        Ok(())
    }

    async fn update_company_profile(&self, profile: &CompanyProfileRow) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.company = Some(profile.clone());
        tables.company_updates += 1;
        Ok(())
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn insert_resume(&self, resume: &ResumeRow) -> Result<(), AppError> {
        self.tables.lock().unwrap().resumes.push(resume.clone());
        Ok(())
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeRow>, AppError> {
        let mut rows = self.tables.lock().unwrap().resumes.clone();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::test_support::applicant;

    #[tokio::test]
    async fn test_applicants_list_oldest_first() {
        let store = MemoryStore::new();
        let (cred, mut newer) = applicant("Bea", None, ApplicantStatus::Pending);
        let (older_cred, mut older) = applicant("Ana", None, ApplicantStatus::Pending);
        newer.created_at = Utc::now();
        older.created_at = newer.created_at - Duration::days(3);
        store.seed_applicant(cred, newer);
        store.seed_applicant(older_cred, older);

        let rows = store.list_applicants(None).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(names, ["Ana", "Bea"]);
    }
}
