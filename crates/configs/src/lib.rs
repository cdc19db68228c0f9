use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;
pub const MAX_PAGE_SIZE: u32 = 200;
pub const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Unset means `TOKIO_WORKER_THREADS`, then `DEFAULT_WORKER_THREADS`.
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: DEFAULT_PORT, worker_threads: None }
    }
}

/// Endpoints and credentials for the Google APIs the app talks to.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    #[serde(default = "default_resource_manager_endpoint")]
    pub resource_manager_endpoint: String,
    #[serde(default = "default_service_usage_endpoint")]
    pub service_usage_endpoint: String,
    /// Static bearer token; when absent tokens come from the metadata server.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_metadata_token_url")]
    pub metadata_token_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            resource_manager_endpoint: default_resource_manager_endpoint(),
            service_usage_endpoint: default_service_usage_endpoint(),
            access_token: None,
            metadata_token_url: default_metadata_token_url(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self { static_dir: default_static_dir() }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_resource_manager_endpoint() -> String { "https://cloudresourcemanager.googleapis.com".into() }
fn default_service_usage_endpoint() -> String { "https://serviceusage.googleapis.com".into() }
fn default_metadata_token_url() -> String {
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token".into()
}
fn default_page_size() -> u32 { MAX_PAGE_SIZE }
fn default_request_timeout() -> u64 { 30 }
fn default_static_dir() -> String { "frontend".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (defaults apply when the file does not exist), then apply
    /// environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env_overrides(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply `PORT`, `HOST` and `GOOGLE_OAUTH_ACCESS_TOKEN` from the given lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("PORT must be an integer in 1..=65535, got {port:?}: {e}"))?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(token) = lookup("GOOGLE_OAUTH_ACCESS_TOKEN") {
            self.google.access_token = Some(token);
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.google.normalize()?;
        if self.frontend.static_dir.trim().is_empty() {
            self.frontend.static_dir = default_static_dir();
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }

    /// Worker threads from config, else the `TOKIO_WORKER_THREADS` lookup, else the default.
    pub fn resolve_worker_threads<F>(&self, lookup: F) -> usize
    where
        F: Fn(&str) -> Option<String>,
    {
        self.worker_threads
            .or_else(|| {
                lookup("TOKIO_WORKER_THREADS")
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .filter(|w| *w > 0)
            })
            .unwrap_or(DEFAULT_WORKER_THREADS)
    }

    /// Listen address; `host` must be an IPv4 or IPv6 literal (`0.0.0.0`, `::`).
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let host = self.host.trim().trim_start_matches('[').trim_end_matches(']');
        let ip: IpAddr = host
            .parse()
            .map_err(|e| anyhow!("server.host must be an IP address, got {:?}: {e}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl GoogleConfig {
    fn normalize(&mut self) -> Result<()> {
        for (key, endpoint) in [
            ("google.resource_manager_endpoint", &mut self.resource_manager_endpoint),
            ("google.service_usage_endpoint", &mut self.service_usage_endpoint),
            ("google.metadata_token_url", &mut self.metadata_token_url),
        ] {
            let trimmed = endpoint.trim().trim_end_matches('/').to_string();
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(anyhow!("{key} must start with http:// or https://"));
            }
            *endpoint = trimmed;
        }
        if self.access_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.access_token = None;
        }
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("google.request_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}
