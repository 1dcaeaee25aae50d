use std::sync::Arc;

use crate::auth::reset::ResetTokenStore;
use crate::auth::tokens::TokenService;
use crate::config::Config;
use crate::image_host::ImageHost;
use crate::mail::Mailer;
use crate::storage::FileStorage;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Profile pictures and company logos.
    pub images: Arc<dyn ImageHost>,
    /// Résumé files (S3 / MinIO).
    pub files: Arc<dyn FileStorage>,
    pub mailer: Arc<dyn Mailer>,
    pub reset_tokens: Arc<dyn ResetTokenStore>,
    pub tokens: TokenService,
    pub config: Config,
}
