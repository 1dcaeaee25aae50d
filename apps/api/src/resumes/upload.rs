use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::account::Role;
use crate::models::resume::ResumeRow;
use crate::multipart::UploadedFile;
use crate::storage::FileStorage;
use crate::store::Store;

pub const ALLOWED_CONTENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Drops any client path and keeps `[A-Za-z0-9._-]`, replacing the rest with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    let clean: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let clean = clean.trim_matches('.');
    if clean.is_empty() {
        "resume".to_string()
    } else {
        clean.to_string()
    }
}

pub fn object_key(owner_id: Uuid, file_name: &str) -> String {
    format!(
        "resumes/{owner_id}/{}-{}",
        Uuid::new_v4(),
        sanitize_file_name(file_name)
    )
}

/// Stores the file and then its metadata row. Staff may upload for anyone,
/// an applicant only for themselves.
pub async fn upload_resume(
    store: &dyn Store,
    files: &dyn FileStorage,
    caller: &AuthUser,
    owner_id: Uuid,
    file: UploadedFile,
) -> Result<ResumeRow, AppError> {
    if caller.role != Role::Staff && caller.id != owner_id {
        return Err(AppError::Forbidden);
    }

    if store.get_applicant(owner_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Applicant {owner_id} not found")));
    }

    let content_type = file.content_type.trim().to_ascii_lowercase();
    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::Validation(
            "Only PDF and Word documents can be uploaded.".to_string(),
        ));
    }

    let key = object_key(owner_id, &file.file_name);
    let size_bytes = file.bytes.len() as i64;
    let file_url = files.put_object(&key, file.bytes, &content_type).await?;

    let row = ResumeRow {
        id: Uuid::new_v4(),
        owner_id,
        file_name: file.file_name,
        size_bytes,
        file_url,
        storage_path: key,
        uploaded_at: Utc::now(),
    };
    store.insert_resume(&row).await?;

    info!(resume_id = %row.id, owner_id = %owner_id, size_bytes, "resume uploaded");
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::ApplicantStatus;
    use crate::store::memory::MemoryStore;
    use crate::test_support::{applicant, pdf, FakeFiles};

    fn staff() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "staff@iain.test".to_string(),
            role: Role::Staff,
        }
    }

    fn seeded() -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let (cred, ana) = applicant("Ana", None, ApplicantStatus::Pending);
        let id = ana.id;
        store.seed_applicant(cred, ana);
        (store, id)
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("C:\\Users\\ana\\My CV (1).pdf"), "My_CV__1_.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".."), "resume");
    }

    #[test]
    fn test_object_key_layout() {
        let owner = Uuid::new_v4();
        let key = object_key(owner, "cv.pdf");
        let prefix = format!("resumes/{owner}/");
        assert!(key.starts_with(&prefix));
        assert!(key.ends_with("-cv.pdf"));
    }

    #[tokio::test]
    async fn test_staff_upload_stores_object_then_metadata() {
        let (store, owner) = seeded();
        let files = FakeFiles::ok();

        let row = upload_resume(&store, &files, &staff(), owner, pdf("cv.pdf"))
            .await
            .unwrap();
        assert_eq!(files.keys(), vec![row.storage_path.clone()]);
        assert_eq!(store.resumes().len(), 1);
        assert_eq!(row.size_bytes, 4);
    }

    #[tokio::test]
    async fn test_owner_may_upload_but_not_others() {
        let (store, owner) = seeded();
        let files = FakeFiles::ok();
        let me = AuthUser {
            id: owner,
            email: "ana@example.com".to_string(),
            role: Role::Applicant,
        };
        assert!(upload_resume(&store, &files, &me, owner, pdf("cv.pdf")).await.is_ok());

        let other = AuthUser {
            id: Uuid::new_v4(),
            ..me
        };
        assert!(matches!(
            upload_resume(&store, &files, &other, owner, pdf("cv.pdf")).await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_rejects_other_content_types() {
        let (store, owner) = seeded();
        let files = FakeFiles::ok();
        let mut file = pdf("cv.exe");
        file.content_type = "application/octet-stream".to_string();

        assert!(matches!(
            upload_resume(&store, &files, &staff(), owner, file).await,
            Err(AppError::Validation(_))
        ));
        assert!(files.keys().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_writes_no_metadata() {
        let (store, owner) = seeded();
        let files = FakeFiles::failing();

        let err = upload_resume(&store, &files, &staff(), owner, pdf("cv.pdf"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "A storage error occurred");
        assert!(store.resumes().is_empty());
    }
}
