//! Fakes and fixtures shared by the unit and router tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::reset::{generate_reset_token, ResetTokenStore};
use crate::auth::tokens::TokenService;
use crate::config::Config;
use crate::errors::AppError;
use crate::image_host::{ImageHost, ImageHostError, ImageUpload};
use crate::mail::{MailError, Mailer, OutgoingEmail};
use crate::models::account::{ApplicantRow, ApplicantStatus, CredentialRow, Role};
use crate::models::notification::{NotificationRow, NotificationType, SCHEDULED};
use crate::models::resume::ResumeRow;
use crate::multipart::UploadedFile;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::FileStorage;
use crate::store::memory::MemoryStore;

pub struct FakeImageHost {
    fail_with: Option<String>,
    uploads: Mutex<Vec<String>>,
}

impl FakeImageHost {
    pub fn ok() -> Self {
        Self {
            fail_with: None,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// Presets of the successful uploads, in order.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, image: ImageUpload, preset: &str) -> Result<String, ImageHostError> {
        if let Some(message) = &self.fail_with {
            return Err(ImageHostError::Rejected {
                status: 400,
                message: message.clone(),
            });
        }
        self.uploads.lock().unwrap().push(preset.to_string());
        Ok(format!("https://img.test/{preset}/{}", image.file_name))
    }
}

pub struct FakeFiles {
    fail: bool,
    keys: Mutex<Vec<String>>,
}

impl FakeFiles {
    pub fn ok() -> Self {
        Self {
            fail: false,
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for FakeFiles {
    async fn put_object(
        &self,
        key: &str,
        _body: Bytes,
        _content_type: &str,
    ) -> Result<String, AppError> {
        if self.fail {
            return Err(AppError::S3("connection refused".to_string()));
        }
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("https://files.test/{key}"))
    }
}

pub struct FakeMailer {
    fail: bool,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl FakeMailer {
    pub fn ok() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Relay {
                status: 503,
                body: "relay unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryResetTokens {
    tokens: Mutex<HashMap<String, Uuid>>,
}

impl MemoryResetTokens {
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl ResetTokenStore for MemoryResetTokens {
    async fn issue(&self, credential_id: Uuid) -> Result<String, AppError> {
        let token = generate_reset_token();
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), credential_id);
        Ok(token)
    }

    async fn consume(&self, token: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self.tokens.lock().unwrap().remove(token))
    }
}

/// Memory-backed `AppState` with handles on every fake.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub images: Arc<FakeImageHost>,
    pub files: Arc<FakeFiles>,
    pub mailer: Arc<FakeMailer>,
    pub reset_tokens: Arc<MemoryResetTokens>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(
            FakeImageHost::ok(),
            FakeFiles::ok(),
            FakeMailer::ok(),
            Config::for_tests(),
        )
    }

    pub fn build(
        images: FakeImageHost,
        files: FakeFiles,
        mailer: FakeMailer,
        config: Config,
    ) -> Self {
        let store = Arc::new(MemoryStore::new());
        let images = Arc::new(images);
        let files = Arc::new(files);
        let mailer = Arc::new(mailer);
        let reset_tokens = Arc::new(MemoryResetTokens::default());

        let state = AppState {
            store: store.clone(),
            images: images.clone(),
            files: files.clone(),
            mailer: mailer.clone(),
            reset_tokens: reset_tokens.clone(),
            tokens: TokenService::new(&config.jwt_secret, config.jwt_ttl_secs),
            config,
        };

        Self {
            state,
            store,
            images,
            files,
            mailer,
            reset_tokens,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn staff_token(&self) -> String {
        self.state
            .tokens
            .issue(Uuid::new_v4(), "staff@iain.test", Role::Staff)
            .unwrap()
    }

    pub fn applicant_token(&self, id: Uuid) -> String {
        self.state
            .tokens
            .issue(id, "applicant@iain.test", Role::Applicant)
            .unwrap()
    }

    /// Seeds an applicant and returns its id.
    pub fn seed_applicant(&self, first: &str, last: Option<&str>, status: ApplicantStatus) -> Uuid {
        let (cred, row) = applicant(first, last, status);
        let id = row.id;
        self.store.seed_applicant(cred, row);
        id
    }
}

pub fn applicant(
    first: &str,
    last: Option<&str>,
    status: ApplicantStatus,
) -> (CredentialRow, ApplicantRow) {
    let id = Uuid::new_v4();
    let email = format!(
        "{}.{}@example.com",
        first.to_lowercase(),
        &id.simple().to_string()[..8]
    );
    let now = Utc::now();
    let credential = CredentialRow {
        id,
        email: email.clone(),
        password_hash: "not-a-real-hash".to_string(),
        role: Role::Applicant,
        created_at: now,
        updated_at: now,
    };
    let row = ApplicantRow {
        id,
        email,
        first_name: first.to_string(),
        last_name: last.map(str::to_string),
        phone: None,
        birth_date: None,
        gender: None,
        street: None,
        city: None,
        zip: None,
        country: None,
        status,
        profile_image_url: None,
        created_at: now,
        last_updated: None,
    };
    (credential, row)
}

/// Scheduled for 2025-11-20, created now.
pub fn notification(target: Uuid, kind: NotificationType, time: Option<&str>) -> NotificationRow {
    NotificationRow {
        id: Uuid::new_v4(),
        title: format!("{kind} with the hiring team"),
        description: "Please confirm your attendance".to_string(),
        notification_type: kind,
        target_applicant_id: target,
        scheduled_date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
        scheduled_time: time.map(str::to_string),
        status: SCHEDULED.to_string(),
        read: false,
        created_at: Utc::now(),
    }
}

/// A 2 KB file uploaded now.
pub fn resume(owner: Uuid, file_name: &str) -> ResumeRow {
    let storage_path = format!("resumes/{owner}/{file_name}");
    ResumeRow {
        id: Uuid::new_v4(),
        owner_id: owner,
        file_name: file_name.to_string(),
        size_bytes: 2048,
        file_url: format!("https://files.test/{storage_path}"),
        storage_path,
        uploaded_at: Utc::now(),
    }
}

pub fn png() -> ImageUpload {
    ImageUpload {
        file_name: "avatar.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: Bytes::from_static(b"\x89PNG"),
    }
}

pub fn pdf(file_name: &str) -> UploadedFile {
    UploadedFile {
        file_name: file_name.to_string(),
        content_type: "application/pdf".to_string(),
        bytes: Bytes::from_static(b"%PDF"),
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// A file part for `multipart_request`: (field, file name, content type, bytes).
pub type FilePart<'a> = (&'a str, &'a str, &'a str, &'a [u8]);

pub fn multipart_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    files: &[FilePart<'_>],
) -> Request<Body> {
    const BOUNDARY: &str = "iain-test-boundary";
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
