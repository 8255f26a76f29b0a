//! Ravens configuration.
//!
//! Resolution order, later wins:
//!   1. Built-in defaults
//!   2. YAML file (`--config <FILE>`, else `<config dir>/ravens/config.yaml` if present)
//!   3. Environment: `SFO_API_URL`, `SFOR_HOST_PREFIX`, `RAVENS_PATH_PREFIX`,
//!      `RAVENS_HOST`, `RAVENS_PORT`
//!
//! The resulting `Config` is built once at startup and shared read-only.

use ravens_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "SFO_API_URL";
pub const ENV_HOST_PREFIX: &str = "SFOR_HOST_PREFIX";
pub const ENV_PATH_PREFIX: &str = "RAVENS_PATH_PREFIX";
pub const ENV_HOST: &str = "RAVENS_HOST";
pub const ENV_PORT: &str = "RAVENS_PORT";

/// Everything the application reads at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub application: ApplicationConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
}

/// Injected into pages, controllers and view-model builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationConfig {
    /// A path to host the app under, e.g. `/ravens`.
    pub path_prefix: String,

    /// The API completed applications are posted to.
    pub api_endpoint: String,

    /// Where absolute URLs sent to visitors (emails etc.) start from.
    pub host_prefix: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/ravens".to_string(),
            api_endpoint: "http://localhost:3020/ravens-api/v1".to_string(),
            host_prefix: "http://localhost:3020".to_string(),
        }
    }
}

impl ApplicationConfig {
    /// Prefix a page path for use in a URL or route.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.path_prefix, path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/assets`.
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3005,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Cookie path. `None` means `{pathPrefix}/`.
    pub cookie_path: Option<String>,
    pub secure: bool,
    pub same_site: SameSitePolicy,
    /// Idle time after which a visitor's session is forgotten.
    pub idle_timeout_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "ravens".to_string(),
            cookie_path: None,
            secure: false,
            same_site: SameSitePolicy::Strict,
            idle_timeout_minutes: 120,
        }
    }
}

impl Config {
    /// Default file location: `<config dir>/ravens/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ravens").join("config.yaml"))
    }

    /// Load defaults, then the YAML file, then the process environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Config =
            serde_yaml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.application.api_endpoint = url;
        }
        if let Some(prefix) = lookup(ENV_HOST_PREFIX) {
            self.application.host_prefix = prefix;
        }
        if let Some(prefix) = lookup(ENV_PATH_PREFIX) {
            self.application.path_prefix = prefix;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("{ENV_PORT} is not a valid port: {port}")))?;
        }
        Ok(())
    }

    /// Strip a trailing `/` from the path prefix and make sure a non-empty
    /// prefix starts with one.
    pub fn normalize(&mut self) {
        let trimmed = self.application.path_prefix.trim().trim_end_matches('/');
        self.application.path_prefix = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        let minutes = self.session.idle_timeout_minutes;
        let usable = chrono::Duration::try_minutes(minutes)
            .is_some_and(|timeout| timeout > chrono::Duration::zero());
        if !usable {
            return Err(Error::Config(format!(
                "session.idleTimeoutMinutes must be a positive number of minutes, got {minutes}"
            )));
        }
        Ok(())
    }

    /// The cookie path actually used.
    pub fn cookie_path(&self) -> String {
        self.session
            .cookie_path
            .clone()
            .unwrap_or_else(|| format!("{}/", self.application.path_prefix))
    }
}
