use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use deathwatch_domain::{RuntimeConfig, EVENTS_FILE_NAME, STATE_FILE_NAME};

pub const CONFIG_ENV: &str = "DEATHWATCH_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub log_file_path: String,
    pub data_dir: String,
    pub scan_interval_seconds: u64,
    pub scan_on_startup: bool,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            api_token: None,
            log_file_path: String::new(),
            data_dir: "./data".to_string(),
            scan_interval_seconds: 0,
            scan_on_startup: true,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(Path::new(&path), |key| env::var(key).ok()).await
    }

    /// Reads `file_path` (missing means defaults), then applies overrides
    /// from `lookup`, resolves relative paths and validates.
    pub async fn load_from<F>(file_path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = file_path.parent();
        let mut config: AppConfig = if file_path.exists() {
            let content = fs::read_to_string(file_path)
                .await
                .with_context(|| format!("failed to read {}", file_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", file_path.display()))?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_overrides(lookup)?;
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        self.log_file_path = self.log_file_path.trim().to_string();
        self.data_dir = self.data_dir.trim().to_string();
        if self.data_dir.is_empty() {
            self.data_dir = AppConfig::default().data_dir;
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.log_file_path = resolve_path(base, &self.log_file_path);
        self.data_dir = resolve_path(base, &self.data_dir);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.log_file_path.is_empty() {
            return Err(anyhow!(
                "log_file_path is required (set it in the config file or DEATHWATCH_LOG_FILE_PATH)"
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn state_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(STATE_FILE_NAME)
    }

    pub fn events_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(EVENTS_FILE_NAME)
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            log_file_path: PathBuf::from(&self.log_file_path),
            state_path: self.state_path(),
            events_path: self.events_path(),
            scan_interval_seconds: self.scan_interval_seconds,
            scan_on_startup: self.scan_on_startup,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DEATHWATCH_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("DEATHWATCH_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Some(value) = lookup("DEATHWATCH_LOG_FILE_PATH") {
            self.log_file_path = value;
        }
        if let Some(value) = lookup("DEATHWATCH_DATA_DIR") {
            self.data_dir = value;
        }
        if let Some(value) = lookup("DEATHWATCH_SCAN_INTERVAL_SECONDS") {
            self.scan_interval_seconds = value.trim().parse().map_err(|err| {
                anyhow!("invalid DEATHWATCH_SCAN_INTERVAL_SECONDS {:?}: {}", value, err)
            })?;
        }
        if let Some(value) = lookup("DEATHWATCH_SCAN_ON_STARTUP") {
            self.scan_on_startup = value.trim().parse().map_err(|err| {
                anyhow!("invalid DEATHWATCH_SCAN_ON_STARTUP {:?}: {}", value, err)
            })?;
        }
        if let Some(value) = lookup("DEATHWATCH_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.trim().parse().map_err(|err| {
                anyhow!("invalid DEATHWATCH_REQUEST_TIMEOUT_SECONDS {:?}: {}", value, err)
            })?;
        }
        Ok(())
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
