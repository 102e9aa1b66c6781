use log::{info, warn};
use once_cell::sync::Lazy;
use url::Url;

/// Base URLs for the HireMind backend services. Each service is overridable
/// through a `HIREMIND_*_URL` environment variable and falls back to the
/// localhost port it is deployed on by default.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub parser_url: String,
    pub auth_url: String,
    pub interview_url: String,
    pub scoring_url: String,
    pub report_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            parser_url: "http://localhost:8001".to_string(),
            auth_url: "http://localhost:8003".to_string(),
            interview_url: "http://localhost:8004".to_string(),
            scoring_url: "http://localhost:8006".to_string(),
            report_url: "http://localhost:8007".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load the configuration from the environment. Invalid URLs are
    /// rejected with a warning and the default endpoint is kept.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        load_url("HIREMIND_PARSER_URL", &mut config.parser_url);
        load_url("HIREMIND_AUTH_URL", &mut config.auth_url);
        load_url("HIREMIND_INTERVIEW_URL", &mut config.interview_url);
        load_url("HIREMIND_SCORING_URL", &mut config.scoring_url);
        load_url("HIREMIND_REPORT_URL", &mut config.report_url);

        info!(
            "Service endpoints: parser={}, auth={}, interview={}, scoring={}, report={}",
            config.parser_url,
            config.auth_url,
            config.interview_url,
            config.scoring_url,
            config.report_url
        );

        config
    }
}

fn load_url(key: &str, slot: &mut String) {
    if let Ok(value) = std::env::var(key) {
        let trimmed = value.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return;
        }
        match Url::parse(trimmed) {
            Ok(_) => *slot = trimmed.to_string(),
            Err(e) => warn!("Ignoring {} ({}): {}", key, trimmed, e),
        }
    }
}

static CONFIG: Lazy<ServiceConfig> = Lazy::new(ServiceConfig::from_env);

pub fn service_config() -> &'static ServiceConfig {
    &CONFIG
}
