//! Full configuration validation.
//!
//! Validates numeric ranges, the server URL scheme, and the extension list.

use crate::schema::ClauseGuardConfig;
use clauseguard_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ClauseGuardConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Server constraints
    if !config.server.base_url.starts_with("http://")
        && !config.server.base_url.starts_with("https://")
    {
        errors.push(format!(
            "server.base_url must start with http:// or https:// (got '{}')",
            config.server.base_url
        ));
    }
    validate_range(
        &mut errors,
        "server.connect_timeout_secs",
        config.server.connect_timeout_secs,
        1,
        60,
    );
    validate_range(
        &mut errors,
        "server.request_timeout_secs",
        config.server.request_timeout_secs,
        1,
        600,
    );

    // Upload constraints
    validate_range(
        &mut errors,
        "upload.max_file_size_mb",
        config.upload.max_file_size_mb,
        1,
        100,
    );
    if config.upload.allowed_extensions.is_empty() {
        errors.push("upload.allowed_extensions must not be empty".into());
    }
    for ext in &config.upload.allowed_extensions {
        if ext.starts_with('.') || ext.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push(format!(
                "upload.allowed_extensions entries must be lowercase without the dot (got '{ext}')"
            ));
        }
    }

    // Text constraints
    validate_range(
        &mut errors,
        "text.min_chars",
        config.text.min_chars as u64,
        1,
        10_000,
    );

    // Polling constraints
    validate_range(
        &mut errors,
        "polling.interval_secs",
        config.polling.interval_secs,
        1,
        60,
    );
    validate_range(
        &mut errors,
        "polling.max_polls",
        u64::from(config.polling.max_polls),
        1,
        1000,
    );
    validate_range(
        &mut errors,
        "polling.redirect_delay_ms",
        config.polling.redirect_delay_ms,
        0,
        10_000,
    );

    // Logging constraints
    match config.logging.level.as_str() {
        "debug" | "info" | "warn" | "error" => {}
        other => errors.push(format!(
            "logging.level must be one of debug/info/warn/error (got '{other}')"
        )),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, field: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{field} must be between {min} and {max} (got {value})"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&ClauseGuardConfig::default()).is_ok());
    }

    #[test]
    fn rejects_bad_url_scheme() {
        let mut config = ClauseGuardConfig::default();
        config.server.base_url = "ftp://example.com".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("server.base_url"));
    }

    #[test]
    fn rejects_out_of_range_polling() {
        let mut config = ClauseGuardConfig::default();
        config.polling.interval_secs = 0;
        config.polling.max_polls = 5000;
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("polling.interval_secs"));
        assert!(msg.contains("polling.max_polls"));
    }

    #[test]
    fn rejects_dotted_or_uppercase_extensions() {
        let mut config = ClauseGuardConfig::default();
        config.upload.allowed_extensions = vec![".pdf".into(), "DOCX".into()];
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("allowed_extensions"));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = ClauseGuardConfig::default();
        config.logging.level = "verbose".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }
}
