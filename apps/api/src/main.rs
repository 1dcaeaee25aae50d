mod accounts;
mod auth;
mod company;
mod config;
mod dashboard;
mod db;
mod errors;
mod format;
mod image_host;
mod mail;
mod models;
mod multipart;
mod notifications;
mod resumes;
mod routes;
mod state;
mod storage;
mod store;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::reset::RedisResetTokens;
use crate::auth::tokens::TokenService;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::image_host::HttpImageHost;
use crate::mail::RelayMailer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::S3FileStorage;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Logging: RUST_LOG wins, otherwise the crate at the configured level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting IAIN admin API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;
    let store = Arc::new(PgStore::new(db));

    // Redis (password reset tokens)
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // S3 / MinIO (résumé files)
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let images = HttpImageHost::new(config.image_upload_url.clone())?;
    let mailer = RelayMailer::new(
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_from.clone(),
        config.mail_from_name.clone(),
    )?;

    if let Some((email, password)) = &config.bootstrap_staff {
        auth::bootstrap_staff(&*store, email, password).await?;
    }

    let state = AppState {
        store,
        images: Arc::new(images),
        files: Arc::new(S3FileStorage::new(
            s3,
            config.s3_bucket.clone(),
            config.s3_public_base_url.clone(),
        )),
        mailer: Arc::new(mailer),
        reset_tokens: Arc::new(RedisResetTokens::new(redis)),
        tokens: TokenService::new(&config.jwt_secret, config.jwt_ttl_secs),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the dashboard host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// S3 client for the résumé bucket. Path-style addressing keeps MinIO working.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "iain-static",
        ))
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
