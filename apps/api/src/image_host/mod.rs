/// Image host client: uploads profile pictures and company logos to the
/// third-party image CDN and returns the hosted `secure_url`.
///
/// Uploads are a single multipart POST of `file` + `upload_preset`. They are
/// not retried: a failed upload aborts the write that depends on it.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const FALLBACK_MESSAGE: &str = "Image upload failed.";

#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host rejected upload (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Image host response had no secure_url")]
    MissingUrl,
}

impl ImageHostError {
    /// The provider's own message, suitable for showing to the user.
    pub fn provider_message(&self) -> String {
        match self {
            ImageHostError::Http(e) => e.to_string(),
            ImageHostError::Rejected { message, .. } => message.clone(),
            ImageHostError::MissingUrl => FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// An image received from a dashboard form, ready to forward.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Uploads under the given preset and returns the hosted URL.
    async fn upload(&self, image: ImageUpload, preset: &str) -> Result<String, ImageHostError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorResponse {
    error: UploadErrorBody,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    message: String,
}

/// Multipart upload client for an unsigned-preset image endpoint.
#[derive(Clone)]
pub struct HttpImageHost {
    client: Client,
    upload_url: String,
}

impl HttpImageHost {
    pub fn new(upload_url: String) -> Result<Self, ImageHostError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            upload_url,
        })
    }
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn upload(&self, image: ImageUpload, preset: &str) -> Result<String, ImageHostError> {
        let size = image.bytes.len();
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", preset.to_string());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Image host returned {}: {}", status, body);
            return Err(ImageHostError::Rejected {
                status: status.as_u16(),
                message: parse_error_message(&body),
            });
        }

        let body: UploadResponse = response.json().await?;
        let url = body.secure_url.ok_or(ImageHostError::MissingUrl)?;
        debug!("Image uploaded ({size} bytes, preset {preset}): {url}");
        Ok(url)
    }
}

/// Pulls `error.message` out of an image host error body.
fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<UploadErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| FALLBACK_MESSAGE.to_string())
}
