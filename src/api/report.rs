//! Score and report retrieval. The scoring service answers both its GET
//! and generating POST with `{"score_report": ...}` — or a 200-status
//! `{"error": ...}` body when nothing is stored yet — so absence is a
//! value here, not an HTTP error.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ApiClient;
use crate::error::ApiError;

/// Score report produced by the scoring service. Fetched, never mutated
/// client-side.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ScoreReport {
    #[serde(default)]
    pub technical: f64,
    #[serde(default)]
    pub communication: f64,
    #[serde(default)]
    pub leadership: f64,
    #[serde(default)]
    pub completeness: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub skill_match_graph: Vec<SkillMatch>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkillMatch {
    pub skill: String,
    #[serde(default)]
    pub job_source: Option<String>,
    #[serde(default)]
    pub matched: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RenderedReport {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub date: String,
    pub report: ScoreReport,
}

#[derive(Deserialize)]
struct ScoreEnvelope {
    #[serde(default)]
    score_report: Option<ScoreReport>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    /// Read a stored score report; `Ok(None)` when none exists yet.
    pub async fn get_score(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<Option<ScoreReport>, ApiError> {
        let url = format!("{}/score/candidate", self.config().scoring_url);
        let envelope: ScoreEnvelope = self
            .get_json(url, &[("candidate_id", candidate_id), ("job_id", job_id)])
            .await?;
        Ok(envelope.score_report)
    }

    /// Ask the scoring service to compute and store the report.
    pub async fn generate_score(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<ScoreReport, ApiError> {
        let url = format!("{}/score/candidate", self.config().scoring_url);
        let body = json!({ "candidate_id": candidate_id, "job_id": job_id });
        let envelope: ScoreEnvelope = self.post_json(url, &body).await?;
        match envelope.score_report {
            Some(report) => Ok(report),
            None => Err(envelope
                .error
                .map(ApiError::Backend)
                .unwrap_or(ApiError::MissingField("score_report"))),
        }
    }

    /// Fetch the rendered report the recruiter prints or archives.
    pub async fn rendered_report(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<RenderedReport, ApiError> {
        let url = format!("{}/report/candidate", self.config().report_url);
        let body = json!({ "candidate_id": candidate_id, "job_id": job_id });
        let value: serde_json::Value = self.post_json(url, &body).await?;
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Err(ApiError::Backend(message.to_string()));
        }
        serde_json::from_value(value).map_err(|_| ApiError::MissingField("report"))
    }
}
