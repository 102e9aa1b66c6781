use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ApiClient;
use crate::error::ApiError;
use crate::session::Role;

#[derive(Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Login response from the auth service. Recruiters come back with
/// `recruiter_id` and `company_name`, candidates with `candidate_id`.
#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub recruiter_id: Option<serde_json::Value>,
    #[serde(default)]
    pub candidate_id: Option<serde_json::Value>,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl LoginResponse {
    /// The id field is role-dependent and the auth service stores it as an
    /// integer row id; normalize to a string either way.
    pub fn user_id(&self, role: Role) -> Result<String, ApiError> {
        let raw = match role {
            Role::Recruiter => self.recruiter_id.as_ref(),
            Role::Candidate => self.candidate_id.as_ref(),
        };
        match raw {
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
            _ => Err(ApiError::MissingField(match role {
                Role::Recruiter => "recruiter_id",
                Role::Candidate => "candidate_id",
            })),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SignupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ApiClient {
    pub async fn login(&self, role: Role, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/auth/{}/login", self.config().auth_url, role.as_str());
        self.post_json(url, request).await
    }

    pub async fn signup(
        &self,
        role: Role,
        request: &SignupRequest,
    ) -> Result<SignupResponse, ApiError> {
        let url = format!("{}/auth/{}/signup", self.config().auth_url, role.as_str());
        self.post_json(url, request).await
    }
}
