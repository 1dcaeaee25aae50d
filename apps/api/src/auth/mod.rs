// Authentication: credentials, access tokens, password reset.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod reset;
pub mod tokens;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::{CredentialRow, Role};
use crate::store::Store;

pub use extractor::{AuthUser, StaffUser};

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Creates a staff credential after the weak-password and duplicate checks.
pub async fn create_staff_credential(
    store: &dyn Store,
    email: &str,
    password: &str,
) -> Result<CredentialRow, AppError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and Password are required.".to_string(),
        ));
    }
    password::validate_password(password)?;

    if store.find_credential_by_email(&email).await?.is_some() {
        return Err(AppError::EmailAlreadyInUse);
    }

    let now = Utc::now();
    let credential = CredentialRow {
        id: Uuid::new_v4(),
        email,
        password_hash: password::hash_password_blocking(password.to_string()).await?,
        role: Role::Staff,
        created_at: now,
        updated_at: now,
    };
    store.insert_credential(&credential).await?;

    info!(user_id = %credential.id, "staff credential created");
    Ok(credential)
}

/// Seeds the configured staff account on first start. A no-op once it exists.
pub async fn bootstrap_staff(store: &dyn Store, email: &str, password: &str) -> Result<(), AppError> {
    if store
        .find_credential_by_email(&normalize_email(email))
        .await?
        .is_some()
    {
        return Ok(());
    }
    create_staff_credential(store, email, password).await?;
    info!("Bootstrap staff account created for {}", normalize_email(email));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_staff_credential_is_lowercased_and_hashed() {
        let store = MemoryStore::new();
        let cred = create_staff_credential(&store, " Admin@IAIN.test ", "hunter22")
            .await
            .unwrap();
        assert_eq!(cred.email, "admin@iain.test");
        assert_eq!(cred.role, Role::Staff);
        assert_ne!(cred.password_hash, "hunter22");
    }

    #[tokio::test]
    async fn test_duplicate_staff_email_is_rejected() {
        let store = MemoryStore::new();
        create_staff_credential(&store, "admin@iain.test", "hunter22")
            .await
            .unwrap();
        let err = create_staff_credential(&store, "ADMIN@iain.test", "hunter22")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyInUse));
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let store = MemoryStore::new();
        bootstrap_staff(&store, "admin@iain.test", "hunter22").await.unwrap();
        bootstrap_staff(&store, "admin@iain.test", "hunter22").await.unwrap();
        assert_eq!(store.credentials().len(), 1);
    }
}
