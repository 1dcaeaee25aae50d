use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::format::short_date;
use crate::models::account::{ApplicantRow, ApplicantStatus};
use crate::store::Store;

pub const RECENT_ACTIVITY_LIMIT: i64 = 5;

/// Share of applicants per status, in percent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusDistribution {
    pub pending: f64,
    pub success: f64,
    pub failed: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub name: String,
    pub status: ApplicantStatus,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub total_applicants: usize,
    pub pending_count: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub success_rate: String,
    pub distribution: StatusDistribution,
    pub recent_activity: Vec<ActivityEntry>,
}

/// `"0%"` for an empty pipeline, otherwise one decimal place.
pub fn success_rate(success: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", success as f64 / total as f64 * 100.0)
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

pub fn compute_metrics(all: &[ApplicantRow], recent: &[ApplicantRow]) -> DashboardMetrics {
    let count = |status: ApplicantStatus| all.iter().filter(|a| a.status == status).count();
    let total = all.len();
    let pending = count(ApplicantStatus::Pending);
    let success = count(ApplicantStatus::Success);
    let failed = count(ApplicantStatus::Failed);

    let recent_activity = recent
        .iter()
        .map(|a| {
            let name = a.display_name();
            ActivityEntry {
                id: a.id,
                name: if name.is_empty() { "Unknown".to_string() } else { name },
                status: a.status,
                date: short_date(&a.last_updated.unwrap_or(a.created_at)),
            }
        })
        .collect();

    DashboardMetrics {
        total_applicants: total,
        pending_count: pending,
        success_count: success,
        failed_count: failed,
        success_rate: success_rate(success, total),
        distribution: StatusDistribution {
            pending: percent(pending, total),
            success: percent(success, total),
            failed: percent(failed, total),
        },
        recent_activity,
    }
}

/// Recomputed from the applicant collection on every call.
pub async fn load_dashboard(store: &dyn Store) -> Result<DashboardMetrics, AppError> {
    let all = store.list_applicants(None).await?;
    let recent = store.recent_applicants(RECENT_ACTIVITY_LIMIT).await?;
    Ok(compute_metrics(&all, &recent))
}
