use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub s3_public_base_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,
    pub image_upload_url: String,
    pub image_preset_applicant: String,
    pub image_preset_company: String,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    pub mail_from_name: String,
    pub web_app_login_url: String,
    pub password_reset_url: String,
    pub allow_staff_signup: bool,
    pub bootstrap_staff: Option<(String, String)>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_bucket = require_env("S3_BUCKET")?;
        let s3_endpoint = require_env("S3_ENDPOINT")?;
        let s3_public_base_url = optional_env("S3_PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket));

        let bootstrap_staff = match (
            optional_env("BOOTSTRAP_STAFF_EMAIL"),
            optional_env("BOOTSTRAP_STAFF_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket,
            s3_endpoint,
            s3_region: optional_env("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            s3_public_base_url,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_ttl_secs: optional_env("JWT_TTL_SECS")
                .map(|v| v.parse::<i64>())
                .transpose()
                .context("JWT_TTL_SECS must be an integer number of seconds")?
                .unwrap_or(8 * 60 * 60),
            image_upload_url: require_env("IMAGE_UPLOAD_URL")?,
            image_preset_applicant: optional_env("IMAGE_PRESET_APPLICANT")
                .unwrap_or_else(|| "applicantprofile".to_string()),
            image_preset_company: optional_env("IMAGE_PRESET_COMPANY")
                .unwrap_or_else(|| "companyimage".to_string()),
            mail_api_url: optional_env("MAIL_API_URL")
                .unwrap_or_else(|| "https://api.resend.com/emails".to_string()),
            mail_api_key: require_env("MAIL_API_KEY")?,
            mail_from: require_env("MAIL_FROM")?,
            mail_from_name: optional_env("MAIL_FROM_NAME").unwrap_or_else(|| "IAIN".to_string()),
            web_app_login_url: optional_env("WEB_APP_LOGIN_URL")
                .unwrap_or_else(|| "http://localhost:5173/signin".to_string()),
            password_reset_url: optional_env("PASSWORD_RESET_URL")
                .unwrap_or_else(|| "http://localhost:5173/reset-password".to_string()),
            allow_staff_signup: optional_env("ALLOW_STAFF_SIGNUP")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            bootstrap_staff,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/iain_test".to_string(),
            redis_url: "redis://localhost".to_string(),
            s3_bucket: "iain-test".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_public_base_url: "http://localhost:9000/iain-test".to_string(),
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_secs: 3600,
            image_upload_url: "http://localhost/upload".to_string(),
            image_preset_applicant: "applicantprofile".to_string(),
            image_preset_company: "companyimage".to_string(),
            mail_api_url: "http://localhost/mail".to_string(),
            mail_api_key: "test".to_string(),
            mail_from: "noreply@iain.test".to_string(),
            mail_from_name: "IAIN".to_string(),
            web_app_login_url: "http://localhost:5173/signin".to_string(),
            password_reset_url: "http://localhost:5173/reset-password".to_string(),
            allow_staff_signup: false,
            bootstrap_staff: None,
            port: 8080,
            rust_log: "debug".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
