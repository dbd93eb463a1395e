//! Configuration schema types for the ClauseGuard client.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults matching the hosted service.

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

// =============================================================================
// Server Config
// =============================================================================

/// Where the ClauseGuard service lives and how to authenticate against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the service, no trailing slash.
    pub base_url: String,
    /// CSRF token sent as `X-CSRFToken` on every request. Usually left empty
    /// here and supplied via `CLAUSEGUARD_CSRF_TOKEN`.
    pub csrf_token: String,
    /// Session cookie value. Usually left empty here and supplied via
    /// `CLAUSEGUARD_SESSION_ID`.
    pub session_id: String,
    /// TCP connect timeout in seconds (valid range: 1-60).
    pub connect_timeout_secs: u64,
    /// Per-request timeout in seconds (valid range: 1-600).
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            csrf_token: String::new(),
            session_id: String::new(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}

// =============================================================================
// Upload Config
// =============================================================================

/// Constraints checked locally before a document upload goes on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum document size in MiB (valid range: 1-100).
    pub max_file_size_mb: u64,
    /// Accepted file extensions, lowercase, without the dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
            allowed_extensions: ["pdf", "docx", "doc", "txt", "rtf", "odt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// =============================================================================
// Text Config
// =============================================================================

/// Constraints on pasted contract text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Minimum number of characters after trimming (valid range: 1-10000).
    pub min_chars: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { min_chars: 100 }
    }
}

// =============================================================================
// Polling Config
// =============================================================================

/// Analysis-job polling cadence and give-up policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between status checks (valid range: 1-60).
    pub interval_secs: u64,
    /// Status checks before the client gives up (valid range: 1-1000).
    /// The default works out to ten minutes at the default interval.
    pub max_polls: u32,
    /// Pause between the completion notice and following the redirect,
    /// in milliseconds (valid range: 0-10000).
    pub redirect_delay_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            max_polls: 300,
            redirect_delay_ms: 800,
        }
    }
}

// =============================================================================
// Logging Config
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for the `clauseguard` crates: debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// =============================================================================
// Root Config
// =============================================================================

/// Root configuration object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseGuardConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub text: TextConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_limits() {
        let config = ClauseGuardConfig::default();
        assert_eq!(config.upload.max_file_size_mb, 10);
        assert_eq!(config.text.min_chars, 100);
        assert_eq!(config.polling.interval_secs, 2);
        assert_eq!(config.polling.max_polls, 300);
        assert_eq!(config.polling.redirect_delay_ms, 800);
        assert!(config.upload.allowed_extensions.contains(&"pdf".into()));
    }

    #[test]
    fn empty_toml_deserializes_to_defaults() {
        let config: ClauseGuardConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.polling.max_polls, 300);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: ClauseGuardConfig = toml::from_str(
            r#"
[polling]
interval_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.polling.interval_secs, 5);
        assert_eq!(config.polling.max_polls, 300);
        assert_eq!(config.upload.max_file_size_mb, 10);
    }
}
