use log::info;
use uuid::Uuid;

use crate::api::api;
use crate::api::catalog::{JobCandidate, JobPosting};
use crate::api::report::{RenderedReport, ScoreReport};
use crate::score::resolve_score;
use crate::session::{require_role, Role};

/// Jobs posted by the logged-in recruiter.
#[tauri::command]
pub async fn recruiter_jobs() -> Result<Vec<JobPosting>, String> {
    let session = require_role(Role::Recruiter)?;
    api()
        .jobs(Some(&session.user_id))
        .await
        .map_err(|e| e.to_string())
}

/// Upload a job description PDF. A fresh job id is minted here; the
/// company id comes from the recruiter's stored company profile, so a
/// profile must be uploaded first.
#[tauri::command]
pub async fn upload_job_post(file_path: String) -> Result<String, String> {
    let session = require_role(Role::Recruiter)?;
    let profiles = api().company_profiles().await.map_err(|e| e.to_string())?;
    let company_id = profiles
        .first()
        .map(|p| p.company_id.clone())
        .ok_or_else(|| "Upload a company profile before posting jobs".to_string())?;

    let job_id = Uuid::new_v4().to_string();
    info!("📄 Posting job {} for company {}", job_id, company_id);
    api()
        .parse_job_post(&file_path, &job_id, &company_id, &session.user_id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(job_id)
}

/// Upload a company profile PDF under a fresh company id.
#[tauri::command]
pub async fn upload_company_profile(file_path: String) -> Result<String, String> {
    require_role(Role::Recruiter)?;
    let company_id = Uuid::new_v4().to_string();
    info!("🏢 Uploading company profile {}", company_id);
    api()
        .parse_company_profile(&file_path, &company_id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(company_id)
}

/// Candidates who applied to one of the recruiter's jobs.
#[tauri::command]
pub async fn job_candidates(job_id: String) -> Result<Vec<JobCandidate>, String> {
    require_role(Role::Recruiter)?;
    api()
        .candidates_for_job(&job_id)
        .await
        .map_err(|e| e.to_string())
}

/// Score bars for one candidate, generating the report on first view.
#[tauri::command]
pub async fn candidate_score(candidate_id: String, job_id: String) -> Result<ScoreReport, String> {
    require_role(Role::Recruiter)?;
    resolve_score(api(), &candidate_id, &job_id)
        .await
        .map_err(|e| e.to_string())
}

/// Full rendered report for the report page.
#[tauri::command]
pub async fn candidate_report(
    candidate_id: String,
    job_id: String,
) -> Result<RenderedReport, String> {
    require_role(Role::Recruiter)?;
    api()
        .rendered_report(&candidate_id, &job_id)
        .await
        .map_err(|e| e.to_string())
}
