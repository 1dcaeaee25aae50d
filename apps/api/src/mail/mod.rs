//! Transactional mail: welcome messages for new applicants and password reset links.

pub mod handlers;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail relay error (status {status}): {body}")]
    Relay { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    from: String,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

/// HTTP client for the transactional mail relay.
#[derive(Clone)]
pub struct RelayMailer {
    client: Client,
    api_url: String,
    api_key: String,
    from_email: String,
    from_name: String,
}

impl RelayMailer {
    pub fn new(
        api_url: String,
        api_key: String,
        from_email: String,
        from_name: String,
    ) -> Result<Self, MailError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_url,
            api_key,
            from_email,
            from_name,
        })
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let request = RelayRequest {
            from: format!("{} <{}>", self.from_name, self.from_email),
            to: vec![email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Relay {
                status: status.as_u16(),
                body,
            });
        }

        debug!(to = %email.to, subject = %email.subject, "email sent");
        Ok(())
    }
}

/// Welcome message for a newly created account. Never includes the password.
pub fn welcome_email(to: &str, login_url: &str) -> OutgoingEmail {
    let html = format!(
        r#"<h1>Welcome!</h1>
<p>Your login email is: <strong>{to}</strong></p>
<p>You can now log in to the web application here:</p>
<p><a href="{login_url}">Click here to log in</a></p>
<br>
<p>Thank you for joining us!</p>"#
    );
    OutgoingEmail {
        to: to.to_string(),
        subject: "Welcome to IAIN - Account Created!".to_string(),
        html,
    }
}

pub fn password_reset_email(to: &str, reset_link: &str) -> OutgoingEmail {
    let html = format!(
        r#"<h2>Password Reset</h2>
<p>We received a request to reset the password for <strong>{to}</strong>.</p>
<p><a href="{reset_link}">Choose a new password</a></p>
<p>This link expires in 15 minutes. If you did not request this, please ignore this email.</p>"#
    );
    OutgoingEmail {
        to: to.to_string(),
        subject: "IAIN - Reset your password".to_string(),
        html,
    }
}
