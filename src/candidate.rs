use log::info;

use crate::api::api;
use crate::api::catalog::{Application, JobPosting};
use crate::api::report::ScoreReport;
use crate::score::resolve_score;
use crate::session::{require_role, Role};

/// Every posted job, for the candidate's job board.
#[tauri::command]
pub async fn open_jobs() -> Result<Vec<JobPosting>, String> {
    require_role(Role::Candidate)?;
    api().jobs(None).await.map_err(|e| e.to_string())
}

/// Jobs the logged-in candidate has already applied to.
#[tauri::command]
pub async fn my_applications() -> Result<Vec<Application>, String> {
    let session = require_role(Role::Candidate)?;
    api()
        .applications_for_candidate(&session.user_id)
        .await
        .map_err(|e| e.to_string())
}

/// Apply to a job: upload the resume for parsing, then warm up the
/// interview session so the first question is ready when the candidate
/// opens the interview page.
#[tauri::command]
pub async fn apply_to_job(job_id: String, resume_path: String) -> Result<(), String> {
    let session = require_role(Role::Candidate)?;
    info!(
        "📨 Candidate {} applying to job {}",
        session.user_id, job_id
    );

    api()
        .parse_resume(
            &resume_path,
            &session.user_id,
            &job_id,
            &session.email,
            &session.name,
        )
        .await
        .map_err(|e| e.to_string())?;

    api()
        .start_interview_session(&session.user_id, &job_id, &[])
        .await
        .map_err(|e| e.to_string())?;

    info!("✅ Application submitted for job {}", job_id);
    Ok(())
}

/// Score bars shown on the interview page once the loop completes,
/// generating the report on first view.
#[tauri::command]
pub async fn my_score(job_id: String) -> Result<ScoreReport, String> {
    let session = require_role(Role::Candidate)?;
    resolve_score(api(), &session.user_id, &job_id)
        .await
        .map_err(|e| e.to_string())
}
