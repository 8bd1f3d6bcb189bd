use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, FileError};

/// Application configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the library REST API
    pub api_base_url: String,
    /// Base URL for static file content (covers, PDFs)
    pub static_base_url: String,
    /// Directory holding persisted client state (session file, downloads)
    pub state_dir: String,
    /// Request timeout in seconds, applied to every outgoing request
    pub request_timeout_secs: u64,
    /// Whether to emit verbose per-request logs
    pub verbose_logging: bool,
    // --- Demo binary ---
    /// Document to open when running the demo binary
    pub document_id: String,
    /// Login credentials for the demo binary (empty = browse as guest)
    pub login_email: String,
    pub login_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://localhost:7212/api".to_string(),
            static_base_url: "https://localhost:7212/static".to_string(),
            state_dir: ".doclib".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
            document_id: String::new(),
            login_email: String::new(),
            login_password: String::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("DOCLIB_API_BASE_URL").unwrap_or(default.api_base_url),
            static_base_url: std::env::var("DOCLIB_STATIC_BASE_URL")
                .unwrap_or(default.static_base_url),
            state_dir: std::env::var("DOCLIB_STATE_DIR").unwrap_or(default.state_dir),
            request_timeout_secs: std::env::var("DOCLIB_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("DOCLIB_VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            document_id: std::env::var("DOCLIB_DOCUMENT_ID").unwrap_or(default.document_id),
            login_email: std::env::var("DOCLIB_LOGIN_EMAIL").unwrap_or(default.login_email),
            login_password: std::env::var("DOCLIB_LOGIN_PASSWORD")
                .unwrap_or(default.login_password),
        }
    }

    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> crate::error::AppResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::File(FileError::Read {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;
        let config = toml::from_str(&text).map_err(|e| {
            AppError::File(FileError::TomlParse {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;
        Ok(config)
    }

    /// Load from `doclib.toml` if present, then apply environment overrides on
    /// top of whatever the file provided.
    pub fn load() -> Self {
        let file_config = Path::new("doclib.toml")
            .exists()
            .then(|| Self::from_file("doclib.toml").ok())
            .flatten();
        match file_config {
            Some(base) => base.with_env_overrides(),
            None => Self::from_env(),
        }
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("DOCLIB_API_BASE_URL").unwrap_or(self.api_base_url),
            static_base_url: std::env::var("DOCLIB_STATIC_BASE_URL")
                .unwrap_or(self.static_base_url),
            state_dir: std::env::var("DOCLIB_STATE_DIR").unwrap_or(self.state_dir),
            request_timeout_secs: std::env::var("DOCLIB_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.request_timeout_secs),
            verbose_logging: std::env::var("DOCLIB_VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
            document_id: std::env::var("DOCLIB_DOCUMENT_ID").unwrap_or(self.document_id),
            login_email: std::env::var("DOCLIB_LOGIN_EMAIL").unwrap_or(self.login_email),
            login_password: std::env::var("DOCLIB_LOGIN_PASSWORD").unwrap_or(self.login_password),
        }
    }
}
