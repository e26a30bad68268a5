//! Application configuration with layered overrides.
//!
//! Resolution order, later layers win:
//!
//! 1. [`AppConfig::default()`]
//! 2. TOML file (`--config`, else the default config path if it exists)
//! 3. Environment variables ([`AppConfig::apply_env`])
//! 4. Command-line flags (applied by the CLI)
//!
//! ```toml
//! mode = "live"
//! data_dir = "/tmp/deep-search"
//!
//! [live]
//! timeout_seconds = 10
//! google_api_key = "..."
//! google_cx = "..."
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SearchError};
use crate::utils::{default_config_path, default_data_dir};

/// Which executor answers searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorMode {
    /// Deterministic demo results, no network.
    #[default]
    Stub,
    /// Real provider APIs.
    Live,
}

impl std::str::FromStr for ExecutorMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stub" | "demo" => Ok(Self::Stub),
            "live" => Ok(Self::Live),
            other => Err(SearchError::Config(format!("unknown executor mode {other:?}"))),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mode: ExecutorMode,
    /// Where the history file lives. Falls back to the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub live: LiveConfig,
}

/// Settings for the live executor. Credentials are optional; a provider
/// whose credential is missing fails at search time, not at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent. Defaults to `deep-search/<version>`.
    pub user_agent: Option<String>,
    /// Results requested per provider call (1-10).
    pub max_results: u8,
    /// Search proxy for document/index searches. When set, Google credentials
    /// are the proxy's business and the key/cx below are not sent.
    pub proxy_url: Option<String>,
    pub google_api_key: Option<String>,
    pub google_cx: Option<String>,
    pub github_token: Option<String>,
    pub shodan_api_key: Option<String>,
    pub google_base_url: String,
    pub github_base_url: String,
    pub shodan_base_url: String,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: None,
            max_results: 10,
            proxy_url: None,
            google_api_key: None,
            google_cx: None,
            github_token: None,
            shodan_api_key: None,
            google_base_url: "https://www.googleapis.com".to_string(),
            github_base_url: "https://api.github.com".to_string(),
            shodan_base_url: "https://api.shodan.io".to_string(),
        }
    }
}

/// Environment variables read by [`AppConfig::apply_env`].
pub const ENV_MODE: &str = "DEEP_SEARCH_MODE";
pub const ENV_PROXY_URL: &str = "DEEP_SEARCH_PROXY_URL";
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_GOOGLE_CX: &str = "GOOGLE_CX";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_SHODAN_API_KEY: &str = "SHODAN_API_KEY";

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| SearchError::Config(format!("invalid {}: {e}", path.display())))
    }

    /// Load from an explicit path, or from the default location if a file
    /// exists there, or fall back to defaults. Environment overrides are applied.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` for variable values. Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(mode) = get(ENV_MODE) {
            self.mode = mode.parse()?;
        }
        if let Some(url) = get(ENV_PROXY_URL) {
            self.live.proxy_url = Some(url);
        }
        if let Some(key) = get(ENV_GOOGLE_API_KEY) {
            self.live.google_api_key = Some(key);
        }
        if let Some(cx) = get(ENV_GOOGLE_CX) {
            self.live.google_cx = Some(cx);
        }
        if let Some(token) = get(ENV_GITHUB_TOKEN) {
            self.live.github_token = Some(token);
        }
        if let Some(key) = get(ENV_SHODAN_API_KEY) {
            self.live.shodan_api_key = Some(key);
        }
        Ok(())
    }

    /// Resolved history directory.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] when neither `data_dir` nor a platform
    /// data directory is available.
    pub fn data_dir(&self) -> Result<PathBuf> {
        self.data_dir
            .clone()
            .or_else(default_data_dir)
            .ok_or_else(|| SearchError::Config("no data directory available".into()))
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `live.timeout_seconds` must be greater than 0
    /// - `live.max_results` must be within 1..=10
    /// - every base URL (and the proxy URL, if set) must be an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.live.timeout_seconds == 0 {
            return Err(SearchError::Config("live.timeout_seconds must be greater than 0".into()));
        }
        if !(1..=10).contains(&self.live.max_results) {
            return Err(SearchError::Config("live.max_results must be between 1 and 10".into()));
        }

        let mut urls = vec![
            ("live.google_base_url", self.live.google_base_url.as_str()),
            ("live.github_base_url", self.live.github_base_url.as_str()),
            ("live.shodan_base_url", self.live.shodan_base_url.as_str()),
        ];
        if let Some(proxy) = &self.live.proxy_url {
            urls.push(("live.proxy_url", proxy.as_str()));
        }
        for (name, raw) in urls {
            let parsed = Url::parse(raw)
                .map_err(|e| SearchError::Config(format!("{name} {raw:?} is not a URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(SearchError::Config(format!("{name} must use http or https")));
            }
        }
        Ok(())
    }
}
