use thiserror::Error;

/// Errors surfaced by the typed API client and the speech service.
///
/// Command handlers flatten these into display strings at the webview
/// boundary; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Malformed response: missing {0}")]
    MissingField(&'static str),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("File not readable: {0}")]
    File(#[from] std::io::Error),

    #[error("Speech {0} is not supported in this environment")]
    SpeechUnsupported(&'static str),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend answered 404, which the interview agent uses
    /// to signal that no session exists yet.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_only_404() {
        let missing = ApiError::Status {
            status: 404,
            detail: "Session not initialized.".to_string(),
        };
        assert!(missing.is_not_found());

        let denied = ApiError::Status {
            status: 401,
            detail: "Invalid email or password.".to_string(),
        };
        assert!(!denied.is_not_found());
        assert!(!ApiError::MissingField("score_report").is_not_found());
    }

    #[test]
    fn status_detail_shows_in_message() {
        let err = ApiError::Status {
            status: 409,
            detail: "Email already exists.".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 409: Email already exists.");
    }
}
