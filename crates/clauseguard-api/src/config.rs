//! Client configuration for the ClauseGuard service.

use std::time::Duration;

/// Connection settings and pre-flight submission limits.
///
/// The limits mirror what the service enforces server-side; checking them
/// locally means an oversized file or too-short text never produces a
/// network request.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the service, no trailing slash.
    pub base_url: String,
    /// CSRF token sent as `X-CSRFToken` on every mutating request.
    /// Empty means unauthenticated (the server will reject writes).
    pub csrf_token: String,
    /// Session cookie value, seeded into the client cookie store.
    pub session_id: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Maximum document size in bytes.
    pub max_file_size: u64,
    /// Accepted file extensions, lowercase, without the dot.
    pub allowed_extensions: Vec<String>,
    /// Minimum pasted-text length in characters, after trimming.
    pub min_text_chars: usize,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("csrf_token", &"[REDACTED]")
            .field("session_id", &"[REDACTED]")
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_file_size", &self.max_file_size)
            .field("allowed_extensions", &self.allowed_extensions)
            .field("min_text_chars", &self.min_text_chars)
            .finish()
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            csrf_token: String::new(),
            session_id: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_file_size: 10 * 1024 * 1024,
            allowed_extensions: ["pdf", "docx", "doc", "txt", "rtf", "odt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_text_chars: 100,
        }
    }

    pub fn with_credentials(
        mut self,
        csrf_token: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        self.csrf_token = csrf_token.into();
        self.session_id = session_id.into();
        self
    }

    /// Maximum document size expressed in whole MiB, for user-facing messages.
    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size / (1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ApiConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn debug_redacts_credentials() {
        let config = ApiConfig::new("http://localhost:8000")
            .with_credentials("csrf-secret", "session-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("csrf-secret"));
        assert!(!debug.contains("session-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_limits_match_service() {
        let config = ApiConfig::new("http://localhost:8000");
        assert_eq!(config.max_file_size_mb(), 10);
        assert_eq!(config.min_text_chars, 100);
        assert_eq!(config.allowed_extensions.len(), 6);
    }
}
