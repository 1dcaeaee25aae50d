use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::format::{file_size, numeric_date};
use crate::models::account::ApplicantRow;
use crate::models::resume::ResumeRow;
use crate::store::Store;

#[derive(Debug, Clone, Serialize)]
pub struct ResumeFile {
    pub id: Uuid,
    pub file_name: String,
    pub file_size: String,
    pub file_url: String,
    pub upload_date: String,
    pub storage_path: String,
}

/// All résumés of one applicant.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeGroup {
    pub owner_id: Uuid,
    pub owner_name: String,
    pub files: Vec<ResumeFile>,
}

/// Full name when both parts are set, else the e-mail, else the raw id.
pub fn owner_name(owner_id: Uuid, applicant: Option<&ApplicantRow>) -> String {
    let Some(applicant) = applicant else {
        return owner_id.to_string();
    };

    let first = applicant.first_name.trim();
    let last = applicant.last_name.as_deref().unwrap_or("").trim();
    if !first.is_empty() && !last.is_empty() {
        format!("{first} {last}")
    } else if !applicant.email.trim().is_empty() {
        applicant.email.clone()
    } else {
        owner_id.to_string()
    }
}

/// Groups by owner. Groups keep the order their first file appears in `rows`.
pub fn group_resumes(
    rows: &[ResumeRow],
    owners: &HashMap<Uuid, ApplicantRow>,
) -> Vec<ResumeGroup> {
    let mut groups: Vec<ResumeGroup> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.owner_id).or_insert_with(|| {
            groups.push(ResumeGroup {
                owner_id: row.owner_id,
                owner_name: owner_name(row.owner_id, owners.get(&row.owner_id)),
                files: Vec::new(),
            });
            groups.len() - 1
        });

        groups[slot].files.push(ResumeFile {
            id: row.id,
            file_name: row.file_name.clone(),
            file_size: file_size(row.size_bytes),
            file_url: row.file_url.clone(),
            upload_date: numeric_date(&row.uploaded_at),
            storage_path: row.storage_path.clone(),
        });
    }

    groups
}

pub async fn load_resume_groups(store: &dyn Store) -> Result<Vec<ResumeGroup>, AppError> {
    let rows = store.list_resumes().await?;

    let mut ids: Vec<Uuid> = rows.iter().map(|r| r.owner_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let owners: HashMap<Uuid, ApplicantRow> = if ids.is_empty() {
        HashMap::new()
    } else {
        store
            .get_applicants(&ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    Ok(group_resumes(&rows, &owners))
}
