//! Read-only listings served by the document parser service: job posts,
//! company profiles, candidates per job, and applications per candidate.

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ApiError;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct JobPosting {
    pub job_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CompanyProfile {
    pub company_id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct JobCandidate {
    pub candidate_id: String,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub candidate_email: String,
    #[serde(default)]
    pub resume_file_path: String,
    #[serde(default)]
    pub applied_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Application {
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub resume_file_path: String,
    #[serde(default)]
    pub applied_at: String,
}

#[derive(Deserialize)]
struct JobsEnvelope {
    #[serde(default)]
    jobs: Vec<JobPosting>,
}

#[derive(Deserialize)]
struct ProfilesEnvelope {
    #[serde(default)]
    company_profiles: Vec<CompanyProfile>,
}

#[derive(Deserialize)]
struct CandidatesEnvelope {
    #[serde(default)]
    candidates: Vec<JobCandidate>,
}

#[derive(Deserialize)]
struct ApplicationsEnvelope {
    #[serde(default)]
    applications: Vec<Application>,
}

impl ApiClient {
    /// List job posts; `recruiter_id` narrows to one recruiter's postings.
    pub async fn jobs(&self, recruiter_id: Option<&str>) -> Result<Vec<JobPosting>, ApiError> {
        let url = format!("{}/jobs", self.config().parser_url);
        let envelope: JobsEnvelope = match recruiter_id {
            Some(id) => self.get_json(url, &[("recruiter_id", id)]).await?,
            None => self.get_json(url, &[]).await?,
        };
        Ok(envelope.jobs)
    }

    pub async fn company_profiles(&self) -> Result<Vec<CompanyProfile>, ApiError> {
        let url = format!("{}/company_profiles", self.config().parser_url);
        let envelope: ProfilesEnvelope = self.get_json(url, &[]).await?;
        Ok(envelope.company_profiles)
    }

    pub async fn candidates_for_job(&self, job_id: &str) -> Result<Vec<JobCandidate>, ApiError> {
        let url = format!("{}/candidates_for_job", self.config().parser_url);
        let envelope: CandidatesEnvelope = self.get_json(url, &[("job_id", job_id)]).await?;
        Ok(envelope.candidates)
    }

    pub async fn applications_for_candidate(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<Application>, ApiError> {
        let url = format!("{}/applications_for_candidate", self.config().parser_url);
        let envelope: ApplicationsEnvelope = self
            .get_json(url, &[("candidate_id", candidate_id)])
            .await?;
        Ok(envelope.applications)
    }
}
