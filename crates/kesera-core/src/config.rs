use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Results site queried when no `base_url` is configured.
pub const DEFAULT_BASE_URL: &str = "https://sw.ministry.et";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Web adapter settings (optional `[web]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Socket address the web adapter listens on.
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Chat dialogue settings (optional `[chat]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Idle time after which a half-finished conversation is dropped.
    pub session_ttl_secs: u64,
    /// How often the web adapter sweeps expired conversations.
    pub sweep_interval_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: 600,
            sweep_interval_secs: 60,
        }
    }
}

impl ChatConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

/// Global configuration loaded from `~/.config/kesera/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeseraConfig {
    /// Scheme and host of the results site, e.g. `https://sw.ministry.et`.
    pub base_url: String,
    /// Total time budget for one request, in seconds.
    pub timeout_secs: u64,
    /// Time budget for establishing the connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Largest response body accepted, in bytes. Larger transfers are aborted.
    pub max_body_bytes: u64,
    /// GET the site root first and reuse its cookies for the result query.
    pub warm_session: bool,
    /// User-Agent sent with every request.
    pub user_agent: String,
    pub web: WebConfig,
    pub chat: ChatConfig,
}

impl Default for KeseraConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 10,
            max_body_bytes: 10 * 1024 * 1024,
            warm_session: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            web: WebConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl KeseraConfig {
    /// Checks values that serde cannot: the base URL must be an absolute http(s) URL
    /// and every limit must be non-zero; curl treats a zero timeout as unbounded.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            anyhow::bail!("timeout_secs and connect_timeout_secs must be at least 1");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be at least 1");
        }
        let parsed = url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url: {}", self.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("base_url must use http or https: {}", self.base_url);
        }
        if parsed.cannot_be_a_base() || parsed.host().is_none() {
            anyhow::bail!("base_url must include a host: {}", self.base_url);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("kesera")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<KeseraConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = KeseraConfig::default();
        write_default(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<KeseraConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: KeseraConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &KeseraConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
    Ok(())
}
