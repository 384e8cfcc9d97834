//! Settings file loader and environment credentials for the review watcher.
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::model::NotifyPolicy;
use crate::practicum::PRACTICUM_ENDPOINT;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}

/// Root configuration struct mirroring the YAML schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub app: App,
    pub practicum: Practicum,
}

/// Loop timing and notification policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct App {
    pub retry_seconds: u64,
    pub request_timeout_seconds: u64,
    pub policy: NotifyPolicy,
}

impl Default for App {
    fn default() -> Self {
        Self {
            retry_seconds: 600,
            request_timeout_seconds: 30,
            policy: NotifyPolicy::OnChange,
        }
    }
}

/// Review API location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Practicum {
    pub endpoint: String,
}

impl Default for Practicum {
    fn default() -> Self {
        Self {
            endpoint: PRACTICUM_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.app.retry_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.app.request_timeout_seconds)
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.practicum.endpoint)
            .map_err(|_| ConfigError::Invalid("practicum.endpoint must be an absolute URL"))
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
/// - A file that does not exist yields the defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let cfg = match fs::read_to_string(path) {
        Ok(content) => serde_yaml::from_str(&content)?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(err) => return Err(err.into()),
    };
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.app.retry_seconds == 0 {
        return Err(ConfigError::Invalid("app.retry_seconds must be > 0"));
    }
    if cfg.app.request_timeout_seconds == 0 {
        return Err(ConfigError::Invalid("app.request_timeout_seconds must be > 0"));
    }
    cfg.endpoint_url()?;
    Ok(())
}

/// The three secrets read from the environment at startup.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Read credentials from the process environment. Unset variables come
    /// back empty; call `ensure_present` before use.
    pub fn from_env() -> Self {
        let read = |name: &str| env::var(name).unwrap_or_default().trim().to_string();
        Self {
            practicum_token: read(PRACTICUM_TOKEN_VAR),
            telegram_token: read(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: read(TELEGRAM_CHAT_ID_VAR),
        }
    }

    /// Names of the variables that are empty or whitespace-only.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn ensure_present(&self) -> Result<(), ConfigError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingCredentials(missing))
        }
    }
}

/// Example settings file with every key spelled out.
pub fn example() -> &'static str {
    r#"app:
  retry_seconds: 600
  request_timeout_seconds: 30
  # on_change | always
  policy: on_change

practicum:
  endpoint: "https://practicum.yandex.ru/api/user_api/homework_statuses/"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn creds() -> Credentials {
        Credentials {
            practicum_token: "p".into(),
            telegram_token: "t".into(),
            telegram_chat_id: "42".into(),
        }
    }

    #[test]
    fn parse_example_ok() {
        let cfg: Config = serde_yaml::from_str(example()).unwrap();
        validate(&cfg).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("app:\n  policy: always\n").unwrap();
        assert_eq!(cfg.app.policy, NotifyPolicy::Always);
        assert_eq!(cfg.app.retry_seconds, 600);
        assert_eq!(cfg.practicum.endpoint, PRACTICUM_ENDPOINT);
    }

    #[test]
    fn invalid_intervals() {
        let mut cfg = Config::default();
        cfg.app.retry_seconds = 0;
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("retry_seconds")), _ => panic!("wrong error") }

        let mut cfg = Config::default();
        cfg.app.request_timeout_seconds = 0;
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn invalid_endpoint() {
        let mut cfg = Config::default();
        cfg.practicum.endpoint = "not a url".into();
        let err = validate(&cfg).unwrap_err();
        match err { ConfigError::Invalid(msg) => assert!(msg.contains("endpoint")), _ => panic!("wrong error") }
    }

    #[test]
    fn load_from_file_ok() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.yaml");
        fs::write(&p, "app:\n  retry_seconds: 5\n").unwrap();
        let cfg = load(Some(&p)).unwrap();
        assert_eq!(cfg.retry_interval(), Duration::from_secs(5));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let td = tempdir().unwrap();
        let cfg = load(Some(&td.path().join("absent.yaml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_rejects_bad_yaml() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.yaml");
        fs::write(&p, "app: [1, 2").unwrap();
        assert!(matches!(load(Some(&p)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn credentials_all_present() {
        assert!(creds().missing().is_empty());
        creds().ensure_present().unwrap();
    }

    #[test]
    fn credentials_report_each_missing_value() {
        let mut c = creds();
        c.telegram_token = "   ".into();
        assert_eq!(c.missing(), vec![TELEGRAM_TOKEN_VAR]);

        let c = Credentials::default();
        let err = c.ensure_present().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn credentials_debug_hides_tokens() {
        let rendered = format!("{:?}", creds());
        assert!(rendered.contains("42"));
        assert!(!rendered.contains("\"p\""));
    }
}
