//! The single organisation-wide profile record (row id `primary`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::image_host::{ImageHost, ImageUpload};
use crate::models::company::{CompanyProfileRow, COMPANY_PROFILE_ID, DEFAULT_LOGO_URL};
use crate::multipart::FormData;
use crate::store::Store;

/// Editable text fields of the profile form.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CompanyFields {
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub registration_date: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
}

impl CompanyFields {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            company_name: form.text_or_empty("company_name"),
            email: form.text_or_empty("email"),
            phone: form.text_or_empty("phone"),
            industry: form.text_or_empty("industry"),
            registration_date: form.text_or_empty("registration_date"),
            street: form.text_or_empty("street"),
            city: form.text_or_empty("city"),
            zip: form.text_or_empty("zip"),
            country: form.text_or_empty("country"),
        }
    }

    fn from_row(row: &CompanyProfileRow) -> Self {
        Self {
            company_name: row.company_name.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            industry: row.industry.clone(),
            registration_date: row.registration_date.clone(),
            street: row.street.clone(),
            city: row.city.clone(),
            zip: row.zip.clone(),
            country: row.country.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfileView {
    pub exists: bool,
    #[serde(flatten)]
    pub fields: CompanyFields,
    pub logo_url: String,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl SaveOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Created => "Profile created successfully!",
            SaveOutcome::Updated => "Profile updated successfully!",
        }
    }
}

pub async fn load_profile(store: &dyn Store) -> Result<CompanyProfileView, AppError> {
    Ok(match store.get_company_profile().await? {
        Some(row) => CompanyProfileView {
            exists: true,
            fields: CompanyFields::from_row(&row),
            logo_url: if row.logo_url.is_empty() {
                DEFAULT_LOGO_URL.to_string()
            } else {
                row.logo_url
            },
            last_updated: Some(row.last_updated),
        },
        None => CompanyProfileView {
            exists: false,
            fields: CompanyFields::default(),
            logo_url: DEFAULT_LOGO_URL.to_string(),
            last_updated: None,
        },
    })
}

/// Creates the profile on first save and updates it in place afterwards.
/// A new logo is uploaded before anything is written.
pub async fn save_profile(
    store: &dyn Store,
    images: &dyn ImageHost,
    image_preset: &str,
    fields: CompanyFields,
    logo: Option<ImageUpload>,
) -> Result<(CompanyProfileRow, SaveOutcome), AppError> {
    if fields.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Company Name is required to save the profile.".to_string(),
        ));
    }

    let existing = store.get_company_profile().await?;

    let logo_url = match logo {
        Some(image) => images
            .upload(image, image_preset)
            .await
            .map_err(|e| AppError::Upload(format!("Image upload failed: {}", e.provider_message())))?,
        None => existing
            .as_ref()
            .map(|row| row.logo_url.clone())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_LOGO_URL.to_string()),
    };

    let row = CompanyProfileRow {
        id: COMPANY_PROFILE_ID.to_string(),
        company_name: fields.company_name,
        email: fields.email,
        phone: fields.phone,
        industry: fields.industry,
        registration_date: fields.registration_date,
        street: fields.street,
        city: fields.city,
        zip: fields.zip,
        country: fields.country,
        logo_url,
        last_updated: Utc::now(),
    };

    let outcome = if existing.is_some() {
        store.update_company_profile(&row).await?;
        SaveOutcome::Updated
    } else {
        store.insert_company_profile(&row).await?;
        SaveOutcome::Created
    };

    info!(outcome = ?outcome, "company profile saved");
    Ok((row, outcome))
}
