use std::env;

use std::time::Duration;

use auth::JwtError;
use auth::TokenLifetimes;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub html: HtmlConfig,
    #[serde(default)]
    pub bootstrap: Option<BootstrapConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub http_port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

/// Token signing material and lifetimes.
///
/// Access and refresh tokens are signed with separate secrets.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: i64,
    #[serde(default = "default_refresh_ttl_hours")]
    pub refresh_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HtmlConfig {
    pub index: String,
}

/// Director account ensured at start-up, so a fresh database has someone
/// able to register further users.
#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapConfig {
    pub director_username: String,
    pub director_password: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_body_limit_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_access_ttl_minutes() -> i64 {
    15
}

fn default_refresh_ttl_hours() -> i64 {
    720
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl JwtConfig {
    /// Token lifetimes, rejected when zero, negative or out of range.
    pub fn lifetimes(&self) -> Result<TokenLifetimes, JwtError> {
        let access = chrono::Duration::try_minutes(self.access_ttl_minutes).ok_or_else(|| {
            JwtError::InvalidLifetime(format!(
                "access_ttl_minutes {} is out of range",
                self.access_ttl_minutes
            ))
        })?;
        let refresh = chrono::Duration::try_hours(self.refresh_ttl_hours).ok_or_else(|| {
            JwtError::InvalidLifetime(format!(
                "refresh_ttl_hours {} is out of range",
                self.refresh_ttl_hours
            ))
        })?;

        TokenLifetimes::new(access, refresh)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__ACCESS_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
