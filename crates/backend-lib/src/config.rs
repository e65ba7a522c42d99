// ============================
// authgate-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::auth::DEFAULT_SESSION_NAME;
use crate::redact::PII_FIELDS;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "authgate.toml";

/// Prefix of environment overrides, e.g. `AUTHGATE_AUTH_TYPE=session_auth`
pub const ENV_PREFIX: &str = "AUTHGATE_";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Settings validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which authenticator guards `/api/v1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// No authentication at all
    None,
    BasicAuth,
    SessionAuth,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// Authenticator guarding `/api/v1`
    pub auth_type: AuthType,
    /// Paths under `/api/v1` reachable without authentication
    pub excluded_paths: Vec<String>,
    /// Cookie carrying the session id for session auth
    pub session_name: String,
    /// Session lifetime in seconds, `0` for sessions that never expire
    pub session_ttl_secs: u64,
    /// Seconds between purges of expired sessions
    pub session_purge_interval_secs: u64,
    /// JSON file holding users; absent keeps users in memory only
    pub users_file: Option<PathBuf>,
    /// scrypt cost as a power of two
    pub scrypt_log_n: u8,
    /// Log fields whose values are redacted
    pub pii_fields: Vec<String>,
    /// Replacement text for redacted values
    pub redaction: String,
    /// Separator between `field=value` pairs in log lines
    pub log_separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            log_level: "info".to_string(),
            auth_type: AuthType::BasicAuth,
            excluded_paths: vec![
                "/api/v1/status/".to_string(),
                "/api/v1/unauthorized/".to_string(),
                "/api/v1/forbidden/".to_string(),
                "/api/v1/auth_session/login/".to_string(),
            ],
            session_name: DEFAULT_SESSION_NAME.to_string(),
            session_ttl_secs: 0,
            session_purge_interval_secs: 60,
            users_file: Some(PathBuf::from("data/users.json")),
            scrypt_log_n: 15,
            pii_fields: PII_FIELDS.iter().map(|f| f.to_string()).collect(),
            redaction: "***".to_string(),
            log_separator: ";".to_string(),
        }
    }
}

impl Settings {
    /// Load from `authgate.toml` (if present) and `AUTHGATE_*` variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from the given TOML file (if present) and `AUTHGATE_*` variables
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Self = Self::figment(path.as_ref())
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults, then the TOML file, then the environment
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: format!("expected one of {LOG_LEVELS:?}, got {:?}", self.log_level),
            });
        }
        if self.session_name.is_empty() || self.session_name.contains([';', '=', ' ']) {
            return Err(ConfigError::Invalid {
                field: "session_name",
                reason: format!("{:?} is not a valid cookie name", self.session_name),
            });
        }
        if self.excluded_paths.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid {
                field: "excluded_paths",
                reason: "entries must not be empty".to_string(),
            });
        }
        if !(1..=20).contains(&self.scrypt_log_n) {
            return Err(ConfigError::Invalid {
                field: "scrypt_log_n",
                reason: format!("{} is outside 1..=20", self.scrypt_log_n),
            });
        }
        if self.session_purge_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "session_purge_interval_secs",
                reason: "must be positive".to_string(),
            });
        }
        if self.log_separator.is_empty() {
            return Err(ConfigError::Invalid {
                field: "log_separator",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
