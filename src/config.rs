use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub health: HealthConfig,
    /// File the settings were read from; `None` when only defaults and
    /// environment overrides apply.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration: explicit path (or `IRANK_CONFIG`), else the
    /// global config file when it exists, then environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("IRANK_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => {
                    config.merge_patch(patch);
                    config.source = Some(path);
                }
                None => {
                    return Err(IrError::MissingConfig(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
            }
        } else if let Some(path) = Self::global_path() {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
                config.source = Some(path);
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a config document, applying it over the defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| IrError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("intellirank/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| IrError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| IrError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.api {
            self.api.merge(patch);
        }
        if let Some(patch) = patch.health {
            self.health.merge(patch);
        }
    }

    /// Apply `IRANK_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("IRANK_API_BASE_URL") {
            self.api.base_url = value;
        }
        if let Some(value) = lookup("IRANK_API_PREFIX") {
            self.api.api_prefix = value;
        }
        if let Some(value) = lookup("IRANK_HEALTH_PATH") {
            self.api.health_path = value;
        }
        if let Some(value) = parse_u64(&lookup, "IRANK_REQUEST_TIMEOUT_SECS")? {
            self.api.request_timeout_secs = value;
        }

        if let Some(value) = parse_u64(&lookup, "IRANK_PROBE_TIMEOUT_MS")? {
            self.health.probe_timeout_ms = value;
        }
        if let Some(value) = parse_u64(&lookup, "IRANK_POLL_INTERVAL_SECS")? {
            self.health.poll_interval_secs = value;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.api.base_url).map_err(|err| {
            IrError::Config(format!("invalid api.base_url {}: {err}", self.api.base_url))
        })?;
        if self.api.request_timeout_secs == 0 {
            return Err(IrError::Config(
                "api.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.health.probe_timeout_ms == 0 {
            return Err(IrError::Config(
                "health.probe_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.health.poll_interval_secs == 0 {
            return Err(IrError::Config(
                "health.poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_prefix: String,
    #[serde(default)]
    pub health_path: String,
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            api_prefix: "/api".to_string(),
            health_path: "/health".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    fn merge(&mut self, patch: ApiPatch) {
        if let Some(value) = patch.base_url {
            self.base_url = value;
        }
        if let Some(value) = patch.api_prefix {
            self.api_prefix = value;
        }
        if let Some(value) = patch.health_path {
            self.health_path = value;
        }
        if let Some(value) = patch.request_timeout_secs {
            self.request_timeout_secs = value;
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    #[serde(default)]
    pub probe_timeout_ms: u64,
    #[serde(default)]
    pub poll_interval_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: 3000,
            poll_interval_secs: 10,
        }
    }
}

impl HealthConfig {
    fn merge(&mut self, patch: HealthPatch) {
        if let Some(value) = patch.probe_timeout_ms {
            self.probe_timeout_ms = value;
        }
        if let Some(value) = patch.poll_interval_secs {
            self.poll_interval_secs = value;
        }
    }

    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub api: Option<ApiPatch>,
    pub health: Option<HealthPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiPatch {
    pub base_url: Option<String>,
    pub api_prefix: Option<String>,
    pub health_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct HealthPatch {
    pub probe_timeout_ms: Option<u64>,
    pub poll_interval_secs: Option<u64>,
}

fn parse_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| IrError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
