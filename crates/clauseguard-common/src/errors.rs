use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("api error: {0}")]
    Api(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("missing field 'server'".into());
        assert_eq!(
            err.to_string(),
            "config validation error: missing field 'server'"
        );
    }

    #[test]
    fn client_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let client_err: ClientError = config_err.into();
        assert!(matches!(client_err, ClientError::Config(_)));
        assert!(client_err.to_string().contains("bad toml"));
    }

    #[test]
    fn client_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let client_err: ClientError = io_err.into();
        assert!(matches!(client_err, ClientError::Io(_)));
        assert!(client_err.to_string().contains("file missing"));
    }

    #[test]
    fn client_error_other_variants() {
        let err = ClientError::Api("submission rejected".into());
        assert_eq!(err.to_string(), "api error: submission rejected");

        let err = ClientError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
