use async_trait::async_trait;
use rand::RngCore;
use uuid::Uuid;

use crate::errors::AppError;

/// Reset links stay valid for 15 minutes.
pub const RESET_TOKEN_TTL_SECS: u64 = 15 * 60;

/// One-time password reset tokens with expiry.
#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    /// Stores a fresh token for the credential and returns it.
    async fn issue(&self, credential_id: Uuid) -> Result<String, AppError>;

    /// Removes the token and returns its credential, if it was still valid.
    async fn consume(&self, token: &str) -> Result<Option<Uuid>, AppError>;
}

pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn redis_key(token: &str) -> String {
    format!("password_reset:{token}")
}

/// Redis-backed tokens; expiry is delegated to the key TTL.
#[derive(Clone)]
pub struct RedisResetTokens {
    client: redis::Client,
}

impl RedisResetTokens {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResetTokenStore for RedisResetTokens {
    async fn issue(&self, credential_id: Uuid) -> Result<String, AppError> {
        let token = generate_reset_token();
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(redis_key(&token))
            .arg(credential_id.to_string())
            .arg("EX")
            .arg(RESET_TOKEN_TTL_SECS)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(token)
    }

    async fn consume(&self, token: &str) -> Result<Option<Uuid>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = redis::cmd("GETDEL")
            .arg(redis_key(token))
            .query_async(&mut conn)
            .await?;
        Ok(value.and_then(|v| Uuid::parse_str(&v).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_tokens_are_random_hex() {
        let a = generate_reset_token();
        let b = generate_reset_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_redis_key_is_namespaced() {
        assert_eq!(redis_key("abc"), "password_reset:abc");
    }
}
