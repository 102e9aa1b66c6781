pub mod auth;
pub mod catalog;
pub mod interview;
pub mod report;
pub mod uploads;

use log::warn;
use once_cell::sync::Lazy;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::{service_config, ServiceConfig};
use crate::error::ApiError;

/// Typed client for the HireMind backend services.
///
/// Every page-level call goes through here: one `reqwest::Client`, one
/// function per endpoint (in the submodules), and a single place where
/// non-2xx responses become [`ApiError::Status`] with the backend's
/// `detail` message when it sends one.
pub struct ApiClient {
    http: Client,
    config: ServiceConfig,
}

impl ApiClient {
    pub fn new(config: ServiceConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self { http, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub(crate) fn post(&self, url: String) -> RequestBuilder {
        self.http.post(url)
    }

    pub(crate) async fn post_json<B, T>(&self, url: String, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(url).json(body).send().await?;
        decode(response).await
    }

    pub(crate) async fn get_json<T>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.http.get(url).query(query).send().await?;
        decode(response).await
    }
}

/// Decode a response body, mapping non-2xx statuses to [`ApiError::Status`].
/// FastAPI services wrap their error messages as `{"detail": ...}`.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .map(|d| match d {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(response.json::<T>().await?)
}

static API: Lazy<ApiClient> = Lazy::new(|| ApiClient::new(service_config().clone()));

/// Process-wide API client used by the command handlers.
pub fn api() -> &'static ApiClient {
    &API
}
