use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::{ApplicantRow, ApplicantStatus, CredentialRow};
use crate::models::company::{CompanyProfileRow, COMPANY_PROFILE_ID};
use crate::models::notification::NotificationRow;
use crate::models::resume::ResumeRow;
use crate::store::{
    ApplicantStore, CompanyStore, CredentialStore, NotificationQuery, NotificationStore,
    ResumeStore,
};

/// PostgreSQL-backed store over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique violation on `credentials.email` to the duplicate e-mail error.
fn map_credential_insert(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::EmailAlreadyInUse
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRow>, AppError> {
        Ok(
            sqlx::query_as::<_, CredentialRow>("SELECT * FROM credentials WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_credential(&self, id: Uuid) -> Result<Option<CredentialRow>, AppError> {
        Ok(
            sqlx::query_as::<_, CredentialRow>("SELECT * FROM credentials WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_credential(&self, credential: &CredentialRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (id, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.id)
        .bind(&credential.email)
        .bind(&credential.password_hash)
        .bind(credential.role.as_str())
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_credential_insert)?;
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE credentials SET password_hash = $1, updated_at = $2 WHERE id = $3")
            .bind(password_hash)
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ApplicantStore for PgStore {
    async fn create_applicant_account(
        &self,
        credential: &CredentialRow,
        applicant: &ApplicantRow,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO credentials (id, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.id)
        .bind(&credential.email)
        .bind(&credential.password_hash)
        .bind(credential.role.as_str())
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_credential_insert)?;

        sqlx::query(
            r#"
            INSERT INTO applicants
                (id, email, first_name, last_name, phone, birth_date, gender,
                 street, city, zip, country, status, profile_image_url, created_at, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(applicant.id)
        .bind(&applicant.email)
        .bind(&applicant.first_name)
        .bind(&applicant.last_name)
        .bind(&applicant.phone)
        .bind(applicant.birth_date)
        .bind(&applicant.gender)
        .bind(&applicant.street)
        .bind(&applicant.city)
        .bind(&applicant.zip)
        .bind(&applicant.country)
        .bind(applicant.status.as_str())
        .bind(&applicant.profile_image_url)
        .bind(applicant.created_at)
        .bind(applicant.last_updated)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_applicants(
        &self,
        status: Option<ApplicantStatus>,
    ) -> Result<Vec<ApplicantRow>, AppError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, ApplicantRow>(
                    "SELECT * FROM applicants WHERE status = $1 ORDER BY created_at ASC",
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ApplicantRow>(
                    "SELECT * FROM applicants ORDER BY created_at ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn get_applicant(&self, id: Uuid) -> Result<Option<ApplicantRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ApplicantRow>("SELECT * FROM applicants WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_applicants(&self, ids: &[Uuid]) -> Result<Vec<ApplicantRow>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(
            sqlx::query_as::<_, ApplicantRow>("SELECT * FROM applicants WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn recent_applicants(&self, limit: i64) -> Result<Vec<ApplicantRow>, AppError> {
        Ok(sqlx::query_as::<_, ApplicantRow>(
            "SELECT * FROM applicants ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_applicant_status(
        &self,
        id: Uuid,
        status: ApplicantStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<ApplicantRow>, AppError> {
        Ok(sqlx::query_as::<_, ApplicantRow>(
            "UPDATE applicants SET status = $1, last_updated = $2 WHERE id = $3 RETURNING *",
        )
        .bind(status.as_str())
        .bind(at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl NotificationStore for PgStore {
    async fn insert_notification(&self, notification: &NotificationRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO notifications
                (id, title, description, notification_type, target_applicant_id,
                 scheduled_date, scheduled_time, status, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(notification.id)
        .bind(&notification.title)
        .bind(&notification.description)
        .bind(notification.notification_type.as_str())
        .bind(notification.target_applicant_id)
        .bind(notification.scheduled_date)
        .bind(&notification.scheduled_time)
        .bind(&notification.status)
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<Vec<NotificationRow>, AppError> {
        // LIMIT NULL is LIMIT ALL in PostgreSQL.
        Ok(sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT * FROM notifications
            WHERE ($1::date IS NULL OR scheduled_date >= $1)
              AND ($2::date IS NULL OR scheduled_date <= $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(query.scheduled_from)
        .bind(query.scheduled_to)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CompanyStore for PgStore {
    async fn get_company_profile(&self) -> Result<Option<CompanyProfileRow>, AppError> {
        Ok(sqlx::query_as::<_, CompanyProfileRow>(
            "SELECT * FROM company_profile WHERE id = $1",
        )
        .bind(COMPANY_PROFILE_ID)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_company_profile(&self, profile: &CompanyProfileRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO company_profile
                (id, company_name, email, phone, industry, registration_date,
                 street, city, zip, country, logo_url, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE
            SET company_name = EXCLUDED.company_name, email = EXCLUDED.email,
                phone = EXCLUDED.phone, industry = EXCLUDED.industry,
                registration_date = EXCLUDED.registration_date, street = EXCLUDED.street,
                city = EXCLUDED.city, zip = EXCLUDED.zip, country = EXCLUDED.country,
                logo_url = EXCLUDED.logo_url, last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.company_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.industry)
        .bind(&profile.registration_date)
        .bind(&profile.street)
        .bind(&profile.city)
        .bind(&profile.zip)
        .bind(&profile.country)
        .bind(&profile.logo_url)
        .bind(profile.last_updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_company_profile(&self, profile: &CompanyProfileRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE company_profile
            SET company_name = $2, email = $3, phone = $4, industry = $5,
                registration_date = $6, street = $7, city = $8, zip = $9,
                country = $10, logo_url = $11, last_updated = $12
            WHERE id = $1
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.company_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.industry)
        .bind(&profile.registration_date)
        .bind(&profile.street)
        .bind(&profile.city)
        .bind(&profile.zip)
        .bind(&profile.country)
        .bind(&profile.logo_url)
        .bind(profile.last_updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn insert_resume(&self, resume: &ResumeRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO resumes
                (id, owner_id, file_name, size_bytes, file_url, storage_path, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(resume.id)
        .bind(resume.owner_id)
        .bind(&resume.file_name)
        .bind(resume.size_bytes)
        .bind(&resume.file_url)
        .bind(&resume.storage_path)
        .bind(resume.uploaded_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY uploaded_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }
}
