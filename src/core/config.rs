//! Service configuration
//!
//! Values are layered: built-in defaults, then an optional `legaldoc.toml`,
//! then environment variables, then whatever the CLI overrides last.

use crate::core::service::ServiceError;
use crate::validation::{UploadGate, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "legaldoc.toml";

/// Environment variable overriding the upload directory
pub const UPLOAD_DIR_ENV: &str = "LEGALDOC_UPLOAD_DIR";

/// Environment variable holding the session signing secret
pub const SESSION_SECRET_ENV: &str = "SESSION_SECRET";

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServiceConfig {
    /// Directory accepted uploads are written to
    pub upload_dir: PathBuf,

    /// Extensions (without the dot) accepted by the upload gate
    #[validate(length(min = 1, message = "at least one extension must be allowed"))]
    pub allowed_extensions: Vec<String>,

    /// Request body ceiling in bytes
    #[validate(range(min = 1, message = "max_upload_bytes must be positive"))]
    pub max_upload_bytes: usize,

    /// Session cookie configuration
    #[validate(nested)]
    pub session: SessionConfig,

    /// HTTP server configuration
    pub server: ServerConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session: SessionConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie carrying the signed session id
    #[validate(length(min = 1, message = "cookie_name cannot be empty"))]
    pub cookie_name: String,

    /// Idle lifetime of a session (seconds)
    #[validate(range(min = 1, message = "ttl_secs must be positive"))]
    pub ttl_secs: u64,

    /// How often expired sessions are swept (seconds)
    #[validate(range(min = 1, message = "purge_interval_secs must be positive"))]
    pub purge_interval_secs: u64,

    /// Signing secret; normally supplied through SESSION_SECRET
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "session secret cannot be empty"))]
    pub secret: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "legaldoc_session".to_string(),
            ttl_secs: 31 * 24 * 60 * 60, // 31 days
            purge_interval_secs: 300,
            secret: "dev-secret-key".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Origins allowed for CORS; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file; missing keys fall back to defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ServiceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| ServiceError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ServiceError> {
        toml::from_str(content).map_err(|e| ServiceError::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load `legaldoc.toml` from `dir` if present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self, ServiceError> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load_from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(UPLOAD_DIR_ENV).filter(|v| !v.is_empty()) {
            self.upload_dir = PathBuf::from(dir);
        }
        if let Some(secret) = lookup(SESSION_SECRET_ENV).filter(|v| !v.is_empty()) {
            self.session.secret = secret;
        }
        self
    }

    /// Check field constraints
    pub fn validate_config(&self) -> Result<(), ServiceError> {
        self.validate()
            .map_err(|e| ServiceError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Upload gate matching this configuration
    pub fn upload_gate(&self) -> UploadGate {
        UploadGate::new(&self.allowed_extensions, self.max_upload_bytes)
    }
}
