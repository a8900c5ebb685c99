use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default = "default_auth_service")]
    pub auth_service: RemoteServiceConfig,
    #[serde(default = "default_user_service")]
    pub user_service: RemoteServiceConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Apply pending migrations on startup.
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

/// Connection settings for one of the remote collaborators (auth/access or user service).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteServiceConfig {
    pub url: String,
    /// Per-attempt timeout.
    #[serde(default = "default_remote_timeout")]
    pub timeout_ms: u64,
    /// Extra attempts after the first one for transient failures.
    #[serde(default = "default_remote_retries")]
    pub retries: u32,
    #[serde(default = "default_remote_backoff")]
    pub backoff_ms: u64,
}

impl RemoteServiceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_ms: default_remote_timeout(),
            retries: default_remote_retries(),
            backoff_ms: default_remote_backoff(),
        }
    }
}

impl Default for RemoteServiceConfig {
    fn default() -> Self { default_auth_service() }
}

/// Moderation policy knobs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PolicyConfig {
    /// Status listed when a read carries no explicit status filter.
    #[serde(default = "default_visible_status")]
    pub default_status: String,
    /// Status written when a create request omits one.
    #[serde(default = "default_create_status")]
    pub create_status: String,
    /// Statuses an ordinary user may submit content into.
    #[serde(default = "default_self_serve")]
    pub self_serve_statuses: Vec<String>,
    /// Fail the whole list when one row cannot be enriched instead of dropping the row.
    #[serde(default)]
    pub strict_list_enrichment: bool,
    #[serde(default = "default_status_cache_ttl")]
    pub status_cache_ttl_secs: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            default_status: default_visible_status(),
            create_status: default_create_status(),
            self_serve_statuses: default_self_serve(),
            strict_list_enrichment: false,
            status_cache_ttl_secs: default_status_cache_ttl(),
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_remote_timeout() -> u64 { 3000 }
fn default_remote_retries() -> u32 { 3 }
fn default_remote_backoff() -> u64 { 100 }
fn default_auth_service() -> RemoteServiceConfig { RemoteServiceConfig::new("http://127.0.0.1:50051") }
fn default_user_service() -> RemoteServiceConfig { RemoteServiceConfig::new("http://127.0.0.1:50051") }
fn default_visible_status() -> String { "published".into() }
fn default_create_status() -> String { "pending".into() }
fn default_self_serve() -> Vec<String> { vec!["pending".into()] }
fn default_status_cache_ttl() -> u64 { 300 }

fn config_path() -> String {
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
    /// Load from the TOML file when present, otherwise from environment variables,
    /// then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = Self::load_or_env(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Only a missing file falls back to the environment; unreadable or malformed files are errors.
    pub fn load_or_env(path: &str) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).with_context(|| format!("invalid config file {path}")),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::from_env()),
            Err(e) => Err(anyhow::Error::new(e).context(format!("cannot read config file {path}"))),
        }
    }

    /// Build a config purely from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig {
            auth_service: default_auth_service(),
            user_service: default_user_service(),
            ..AppConfig::default()
        };
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT") {
            cfg.server.port = port;
        }
        if let Ok(url) = std::env::var("AUTH_SERVICE_URL") {
            cfg.auth_service.url = url;
        }
        if let Ok(url) = std::env::var("USER_SERVICE_URL") {
            cfg.user_service.url = url;
        }
        if let Some(ms) = env_parse::<u64>("REMOTE_TIMEOUT_MS") {
            cfg.auth_service.timeout_ms = ms;
            cfg.user_service.timeout_ms = ms;
        }
        if let Some(n) = env_parse::<u32>("REMOTE_RETRIES") {
            cfg.auth_service.retries = n;
            cfg.user_service.retries = n;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth_service.validate("auth_service")?;
        self.user_service.validate("user_service")?;
        self.policy.validate()?;
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // DATABASE_URL fills the gap when the file leaves it out
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl RemoteServiceConfig {
    fn validate(&self, section: &str) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(anyhow!("{section}.url must start with http:// or https://"));
        }
        if self.timeout_ms == 0 {
            return Err(anyhow!("{section}.timeout_ms must be > 0"));
        }
        Ok(())
    }
}

impl PolicyConfig {
    fn validate(&self) -> Result<()> {
        if self.default_status.trim().is_empty() {
            return Err(anyhow!("policy.default_status must not be empty"));
        }
        if self.create_status.trim().is_empty() {
            return Err(anyhow!("policy.create_status must not be empty"));
        }
        Ok(())
    }
}
