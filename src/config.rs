use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub provider: ProviderConfig,

    pub resolver: ResolverConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/anistream.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

/// Streaming provider endpoint. Read once at startup; the client built from
/// it is never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of a Consumet-compatible API
    pub base_url: String,

    /// Provider path segment, e.g. `gogoanime` in `/anime/gogoanime/...`
    pub provider: String,

    /// Upper bound for each upstream call (search, episode listing, sources)
    pub request_timeout_seconds: u64,

    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            provider: "gogoanime".to_string(),
            request_timeout_seconds: 10,
            user_agent: "Anistream/1.0".to_string(),
        }
    }
}

impl ProviderConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Share one upstream resolution between concurrent identical requests
    pub coalesce_requests: bool,

    /// Persist mappings discovered through title search
    pub auto_persist: bool,

    /// Note stored in the metadata of auto-discovered mappings
    pub discovery_note: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            coalesce_requests: true,
            auto_persist: true,
            discovery_note: "Auto-mapped from stream resolution".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("anistream").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".anistream").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.provider.base_url.trim().is_empty() {
            anyhow::bail!("Provider base URL cannot be empty");
        }

        let url = url::Url::parse(&self.provider.base_url)
            .with_context(|| format!("Invalid provider base URL: {}", self.provider.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Provider base URL must use http or https");
        }

        if self.provider.provider.trim().is_empty() {
            anyhow::bail!("Provider name cannot be empty");
        }

        if self.provider.request_timeout_seconds == 0 {
            anyhow::bail!("Provider request timeout must be > 0");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) cannot exceed max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        Ok(())
    }
}
