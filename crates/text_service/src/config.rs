//! Startup configuration for the text service
//!
//! Everything is read once from the process environment (after `.env`
//! loading in the binary) and handed to the server as an [`AppConfig`].
//!
//! Environment variables:
//! - `GEMINI_API_KEY`: API credential (required unless `GEMINI_API_KEY_FILE` is set)
//! - `GEMINI_API_KEY_FILE`: path to a file holding the credential
//! - `GEMINI_API_BASE`: upstream base URL (default: public Gemini v1beta endpoint)
//! - `GEMINI_TEXT_MODEL`: model id (default: `gemini-2.5-flash`)
//! - `GEMINI_TIMEOUT_SECS`: upstream request timeout in seconds (default: 60)
//! - `APP_HOST`: bind address (default: `0.0.0.0`)
//! - `APP_PORT`: bind port (default: 8080)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use gemini_client::{DEFAULT_BASE_URL, DEFAULT_TEXT_MODEL};
use thiserror::Error;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const API_KEY_FILE_ENV: &str = "GEMINI_API_KEY_FILE";
pub const API_BASE_ENV: &str = "GEMINI_API_BASE";
pub const TEXT_MODEL_ENV: &str = "GEMINI_TEXT_MODEL";
pub const TIMEOUT_ENV: &str = "GEMINI_TIMEOUT_SECS";
pub const HOST_ENV: &str = "APP_HOST";
pub const PORT_ENV: &str = "APP_PORT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set. Put it in a .env file or env var.")]
    MissingApiKey,

    #[error("Failed to read API key file '{}': {source}", .path.display())]
    ApiKeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base: String,
    pub text_model: String,
    pub request_timeout: Duration,
    pub host: String,
    pub port: u16,
}

// The API key is redacted.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("text_model", &self.text_model)
            .field("request_timeout", &self.request_timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank
    /// values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = match (get(API_KEY_ENV), get(API_KEY_FILE_ENV)) {
            (Some(key), _) => key,
            (None, Some(path)) => read_key_file(PathBuf::from(path))?,
            (None, None) => return Err(ConfigError::MissingApiKey),
        };

        Ok(Self {
            api_key,
            api_base: get(API_BASE_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            text_model: get(TEXT_MODEL_ENV).unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            request_timeout: Duration::from_secs(parse_or(
                TIMEOUT_ENV,
                get(TIMEOUT_ENV),
                DEFAULT_TIMEOUT_SECS,
            )?),
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(PORT_ENV, get(PORT_ENV), DEFAULT_PORT)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_key_file(path: PathBuf) -> Result<String, ConfigError> {
    let key = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::ApiKeyFile {
            path: path.clone(),
            source,
        })?
        .trim()
        .to_string();

    if key.is_empty() {
        return Err(ConfigError::MissingApiKey);
    }
    Ok(key)
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert_eq!(
            err.to_string(),
            "GEMINI_API_KEY is not set. Put it in a .env file or env var."
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        assert!(matches!(
            load(&[(API_KEY_ENV, "   ")]),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = load(&[(API_KEY_ENV, "secret")]).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_base, DEFAULT_BASE_URL);
        assert_eq!(config.text_model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            (API_KEY_ENV, "secret"),
            (API_BASE_ENV, "http://localhost:9000/v1beta"),
            (TEXT_MODEL_ENV, "gemini-pro"),
            (TIMEOUT_ENV, "5"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "3000"),
        ])
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:9000/v1beta");
        assert_eq!(config.text_model, "gemini-pro");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[(API_KEY_ENV, "secret"), (PORT_ENV, "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for APP_PORT: 'eighty'");
    }

    #[test]
    fn key_file_is_used_when_env_key_absent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "file-secret").unwrap();

        let config = load(&[(API_KEY_FILE_ENV, file.path().to_str().unwrap())]).unwrap();
        assert_eq!(config.api_key, "file-secret");
    }

    #[test]
    fn env_key_wins_over_key_file() {
        let config = load(&[
            (API_KEY_ENV, "env-secret"),
            (API_KEY_FILE_ENV, "/nonexistent/key"),
        ])
        .unwrap();
        assert_eq!(config.api_key, "env-secret");
    }

    #[test]
    fn unreadable_key_file_is_reported() {
        let err = load(&[(API_KEY_FILE_ENV, "/nonexistent/gemini/key")]).unwrap_err();
        assert!(matches!(err, ConfigError::ApiKeyFile { .. }));
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = load(&[(API_KEY_ENV, "super-secret")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
