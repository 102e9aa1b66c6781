//! Multipart PDF uploads to the document parser service. Each upload is a
//! single request/response; the parser extracts text, runs the structured
//! parse, and kicks off embedding downstream.

use log::info;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;

use super::{decode, ApiClient};
use crate::error::ApiError;

#[derive(Deserialize, Debug)]
pub struct ParseOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub text_length: u64,
    #[serde(default)]
    pub chunks_prepared: u64,
}

async fn file_part(path: &str) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/pdf")?)
}

impl ApiClient {
    /// Upload a resume for one candidate/job pair. The parser keys the
    /// application on `(candidate_id, job_id)`.
    pub async fn parse_resume(
        &self,
        file_path: &str,
        candidate_id: &str,
        job_id: &str,
        email: &str,
        name: &str,
    ) -> Result<ParseOutcome, ApiError> {
        info!(
            "Uploading resume for candidate {} on job {}",
            candidate_id, job_id
        );
        let form = Form::new()
            .part("file", file_part(file_path).await?)
            .text("candidate_id", candidate_id.to_string())
            .text("job_id", job_id.to_string())
            .text("email", email.to_string())
            .text("name", name.to_string());
        let url = format!("{}/parse/resume", self.config().parser_url);
        let response = self.post(url).multipart(form).send().await?;
        decode(response).await
    }

    pub async fn parse_job_post(
        &self,
        file_path: &str,
        job_id: &str,
        company_id: &str,
        recruiter_id: &str,
    ) -> Result<ParseOutcome, ApiError> {
        info!("Uploading job post {} for company {}", job_id, company_id);
        let form = Form::new()
            .part("file", file_part(file_path).await?)
            .text("job_id", job_id.to_string())
            .text("company_id", company_id.to_string())
            .text("recruiter_id", recruiter_id.to_string());
        let url = format!("{}/parse/job_post", self.config().parser_url);
        let response = self.post(url).multipart(form).send().await?;
        decode(response).await
    }

    pub async fn parse_company_profile(
        &self,
        file_path: &str,
        company_id: &str,
    ) -> Result<ParseOutcome, ApiError> {
        info!("Uploading company profile {}", company_id);
        let form = Form::new()
            .part("file", file_part(file_path).await?)
            .text("company_id", company_id.to_string());
        let url = format!("{}/parse/company_profile", self.config().parser_url);
        let response = self.post(url).multipart(form).send().await?;
        decode(response).await
    }
}
