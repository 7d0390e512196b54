use super::cli_runtime::{DEFAULT_RUNTIME_BINARY, DEFAULT_TIMEOUT};
use crate::domain::SortOrder;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "neko-viewer.toml";
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default_neko_viewer.toml");

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8731;
pub const DEFAULT_FILTER: &str = "neko";

pub fn default_config_dir() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.config/neko-viewer").as_ref())
}

pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    fs::create_dir_all(config_dir).with_context(|| format!("creating {:?}", config_dir))
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RuntimeConfig {
    /// CLI used to reach the runtime (`docker`, `podman`, or a full path)
    pub binary: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct DiscoveryConfig {
    pub filter: Option<String>,
    pub sort: Option<SortOrder>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(host) = other.server.host {
            self.server.host = Some(host);
        }
        if let Some(port) = other.server.port {
            self.server.port = Some(port);
        }
        if let Some(binary) = other.runtime.binary {
            self.runtime.binary = Some(binary);
        }
        if let Some(secs) = other.runtime.timeout_secs {
            self.runtime.timeout_secs = Some(secs);
        }
        if let Some(filter) = other.discovery.filter {
            self.discovery.filter = Some(filter);
        }
        if let Some(sort) = other.discovery.sort {
            self.discovery.sort = Some(sort);
        }
    }

    /// Fills in defaults and validates the result.
    pub fn resolve(self) -> Result<Settings> {
        let timeout = match self.runtime.timeout_secs {
            Some(0) => bail!("runtime.timeout_secs must be greater than zero"),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        let runtime_binary = self
            .runtime
            .binary
            .unwrap_or_else(|| DEFAULT_RUNTIME_BINARY.to_string());
        if runtime_binary.trim().is_empty() {
            bail!("runtime.binary must not be empty");
        }

        Ok(Settings {
            host: self.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.server.port.unwrap_or(DEFAULT_PORT),
            runtime_binary,
            timeout,
            filter: self
                .discovery
                .filter
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            sort: self.discovery.sort.unwrap_or_default(),
        })
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub runtime_binary: String,
    pub timeout: Duration,
    pub filter: String,
    pub sort: SortOrder,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            runtime_binary: DEFAULT_RUNTIME_BINARY.to_string(),
            timeout: DEFAULT_TIMEOUT,
            filter: DEFAULT_FILTER.to_string(),
            sort: SortOrder::default(),
        }
    }
}

impl Settings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn load_config_file(path: &Path) -> Result<Option<AppConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("parsing {:?}", path))?;
    debug!(path = ?path, "loaded config file");

    Ok(Some(config))
}

/// Loads `<config_dir>/neko-viewer.toml`, then `./neko-viewer.toml` on top of it.
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    load_layered(&[
        config_dir.join(CONFIG_FILE_NAME),
        PathBuf::from("./").join(CONFIG_FILE_NAME),
    ])
}

/// Later paths win. Missing files are skipped.
pub fn load_layered(paths: &[PathBuf]) -> Result<AppConfig> {
    let mut app_config = AppConfig::default();
    for path in paths {
        if let Some(layer) = load_config_file(path)? {
            app_config.merge(layer);
        }
    }
    Ok(app_config)
}

/// Writes the default config file unless one already exists. Returns whether it wrote.
pub fn install_default_config(target_dir: &Path) -> Result<bool> {
    ensure_config_dir(target_dir)?;

    let target = target_dir.join(CONFIG_FILE_NAME);
    if target.exists() {
        return Ok(false);
    }

    fs::write(&target, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("writing template to {:?}", target))?;
    Ok(true)
}
