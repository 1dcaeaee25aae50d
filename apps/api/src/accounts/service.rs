use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::auth::{normalize_email, password};
use crate::errors::AppError;
use crate::image_host::{ImageHost, ImageUpload};
use crate::models::account::{ApplicantRow, ApplicantStatus, CredentialRow, Role};
use crate::multipart::FormData;
use crate::store::Store;

/// Fields of the create-account form. Optional fields are `None` when left blank.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

impl NewAccount {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            email: form.text("email"),
            password: form.raw("password").filter(|p| !p.is_empty()).map(str::to_string),
            first_name: form.text("first_name"),
            last_name: form.text("last_name"),
            phone: form.text("phone"),
            birth_date: form.text("birth_date"),
            gender: form.text("gender"),
            street: form.text("street"),
            city: form.text("city"),
            zip: form.text("zip"),
            country: form.text("country"),
        }
    }
}

/// Creates the credential and the applicant profile.
///
/// The profile image goes up first so a failed upload writes nothing;
/// after that both rows are written in one transaction.
pub async fn create_account(
    store: &dyn Store,
    images: &dyn ImageHost,
    image_preset: &str,
    account: NewAccount,
    profile_image: Option<ImageUpload>,
) -> Result<ApplicantRow, AppError> {
    let (Some(email), Some(password), Some(first_name)) =
        (account.email, account.password, account.first_name)
    else {
        return Err(AppError::Validation(
            "Email, Password, and First Name are required.".to_string(),
        ));
    };
    password::validate_password(&password)?;

    let birth_date = account
        .birth_date
        .as_deref()
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::Validation("Birth date must be in YYYY-MM-DD format.".to_string()))?;

    let email = normalize_email(&email);
    if store.find_credential_by_email(&email).await?.is_some() {
        return Err(AppError::EmailAlreadyInUse);
    }

    let profile_image_url = match profile_image {
        Some(image) => Some(
            images
                .upload(image, image_preset)
                .await
                .map_err(|e| AppError::Upload(format!("Image upload error: {}", e.provider_message())))?,
        ),
        None => None,
    };

    let now = Utc::now();
    let id = Uuid::new_v4();
    let credential = CredentialRow {
        id,
        email: email.clone(),
        password_hash: password::hash_password_blocking(password).await?,
        role: Role::Applicant,
        created_at: now,
        updated_at: now,
    };
    let applicant = ApplicantRow {
        id,
        email,
        first_name,
        last_name: account.last_name,
        phone: account.phone,
        birth_date,
        gender: account.gender,
        street: account.street,
        city: account.city,
        zip: account.zip,
        country: account.country,
        status: ApplicantStatus::Pending,
        profile_image_url,
        created_at: now,
        last_updated: None,
    };

    store.create_applicant_account(&credential, &applicant).await?;

    info!(applicant_id = %id, "applicant account created");
    Ok(applicant)
}

/// Outcome of a status edit. `changed` is false when the status was already set.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub applicant: ApplicantRow,
    pub changed: bool,
}

pub fn parse_status(raw: &str) -> Result<ApplicantStatus, AppError> {
    raw.trim().parse().map_err(|_| {
        let expected: Vec<&str> = ApplicantStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::Validation(format!(
            "Invalid status '{}'. Expected one of: {}",
            raw,
            expected.join(", ")
        ))
    })
}

pub async fn update_status(
    store: &dyn Store,
    id: Uuid,
    raw_status: &str,
) -> Result<StatusChange, AppError> {
    let status = parse_status(raw_status)?;
    let current = store
        .get_applicant(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Applicant {id} not found")))?;

    if current.status == status {
        return Ok(StatusChange {
            applicant: current,
            changed: false,
        });
    }

    let applicant = store
        .update_applicant_status(id, status, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Applicant {id} not found")))?;

    info!(applicant_id = %id, from = %current.status, to = %status, "applicant status changed");
    Ok(StatusChange {
        applicant,
        changed: true,
    })
}
