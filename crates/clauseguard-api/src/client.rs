//! HTTP client construction, endpoint joining, and response decoding.

use std::sync::Arc;

use crate::{ApiConfig, ApiError};

/// Client for the ClauseGuard HTTP API.
pub struct ApiClient {
    pub(crate) config: ApiConfig,
    pub(crate) http: reqwest::Client,
}

impl ApiClient {
    /// Build a client from config. Fails if the base URL cannot be parsed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let base = reqwest::Url::parse(&config.base_url)
            .map_err(|e| ApiError::Parse(format!("invalid base URL '{}': {e}", config.base_url)))?;

        let jar = reqwest::cookie::Jar::default();
        if !config.session_id.is_empty() {
            jar.add_cookie_str(&format!("sessionid={}", config.session_id), &base);
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .cookie_provider(Arc::new(jar))
            .build()
            .expect("failed to build HTTP client");

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL for a service route. `path` has no leading slash and
    /// keeps its trailing slash, matching the service's route table.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Headers carried by every request: JSON accept plus the CSRF token
    /// when one is configured.
    pub(crate) fn base_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "application/json".parse().expect("invalid accept header"),
        );
        if !self.config.csrf_token.is_empty() {
            headers.insert(
                "X-CSRFToken",
                self.config
                    .csrf_token
                    .parse()
                    .expect("invalid CSRF token header"),
            );
        }
        headers
    }
}

/// Decode a response body as JSON, falling back to an error object built
/// from the first 300 characters of the raw body (so an HTML error page
/// still yields something readable).
pub(crate) async fn safe_json(response: reqwest::Response) -> Result<serde_json::Value, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok(serde_json::from_str(&text).unwrap_or_else(|_| {
        let prefix: String = text.chars().take(300).collect();
        serde_json::json!({ "error": prefix })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = ApiClient::new(ApiConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(
            client.endpoint("analyze-text/"),
            "http://localhost:8000/analyze-text/"
        );
        assert_eq!(
            client.endpoint("task-status/abc123/"),
            "http://localhost:8000/task-status/abc123/"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ApiClient::new(ApiConfig::new("not a url"));
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn csrf_header_present_only_when_configured() {
        let client = ApiClient::new(ApiConfig::new("http://localhost:8000")).unwrap();
        assert!(!client.base_headers().contains_key("X-CSRFToken"));

        let client = ApiClient::new(
            ApiConfig::new("http://localhost:8000").with_credentials("tok123", "sess456"),
        )
        .unwrap();
        let headers = client.base_headers();
        assert_eq!(headers.get("X-CSRFToken").unwrap(), "tok123");
        assert_eq!(headers.get("accept").unwrap(), "application/json");
    }
}
