mod analyze;
mod chat;
mod cli;
mod risk;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use clauseguard_api::{ApiClient, ApiConfig};
use clauseguard_config::ClauseGuardConfig;

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Existing environment variables win over file entries.
fn load_dotenv() {
    let candidates = [
        std::path::PathBuf::from(".env"),
        std::path::PathBuf::from("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

/// Map the loaded config plus credential overrides onto the API client
/// config. Environment credentials win over the config file.
fn api_config_from(
    config: &ClauseGuardConfig,
    csrf_override: Option<String>,
    session_override: Option<String>,
) -> ApiConfig {
    let mut api = ApiConfig::new(config.server.base_url.clone());
    api.connect_timeout = Duration::from_secs(config.server.connect_timeout_secs);
    api.request_timeout = Duration::from_secs(config.server.request_timeout_secs);
    api.max_file_size = config.upload.max_file_size_mb * 1024 * 1024;
    api.allowed_extensions = config.upload.allowed_extensions.clone();
    api.min_text_chars = config.text.min_chars;
    api.with_credentials(
        csrf_override.unwrap_or_else(|| config.server.csrf_token.clone()),
        session_override.unwrap_or_else(|| config.server.session_id.clone()),
    )
}

#[tokio::main]
async fn main() {
    // Load .env before anything reads credentials
    load_dotenv();

    // Parse CLI arguments
    let args = cli::parse();

    // Load config (the loader's own log lines predate the subscriber and
    // are dropped; the level it carries is worth the trade)
    let config = match &args.config {
        Some(path) => clauseguard_config::load_from_path(path),
        None => clauseguard_config::load_config(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Config load failed, using defaults: {e}");
        ClauseGuardConfig::default()
    });

    // Initialize logging
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let directive = format!("clauseguard={level}");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "clauseguard=info".parse().expect("valid directive")),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("ClauseGuard client v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(server = %config.server.base_url, "using service");

    // Build the API client
    let api_config = api_config_from(
        &config,
        std::env::var("CLAUSEGUARD_CSRF_TOKEN").ok(),
        std::env::var("CLAUSEGUARD_SESSION_ID").ok(),
    );
    let client = match ApiClient::new(api_config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let result = match args.command {
        cli::Command::Analyze { file, text } => {
            match analyze::AnalyzeSource::from_args(file, text).await {
                Ok(source) => analyze::run(client, &config, source).await,
                Err(e) => Err(e),
            }
        }
        cli::Command::Chat { contract_id } => chat::run(client, contract_id).await,
        cli::Command::Risk {
            risk_id,
            status,
            note,
        } => risk::update(client, risk_id, status, &note).await,
        cli::Command::Delete { contract_id } => risk::delete(client, contract_id).await,
    };

    if let Err(e) = result {
        // The user already saw the notice; keep the exit code honest.
        tracing::debug!("command failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_credentials_override_config_file() {
        let mut config = ClauseGuardConfig::default();
        config.server.csrf_token = "from-file".into();
        config.server.session_id = "file-session".into();

        let api = api_config_from(&config, Some("from-env".into()), None);
        assert_eq!(api.csrf_token, "from-env");
        assert_eq!(api.session_id, "file-session");
    }

    #[test]
    fn limits_carry_over_from_config() {
        let mut config = ClauseGuardConfig::default();
        config.upload.max_file_size_mb = 25;
        config.text.min_chars = 250;

        let api = api_config_from(&config, None, None);
        assert_eq!(api.max_file_size, 25 * 1024 * 1024);
        assert_eq!(api.min_text_chars, 250);
        assert_eq!(api.connect_timeout, Duration::from_secs(10));
    }
}
