//! Server Configuration

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Full server configuration. Every value can be overridden through a
/// `studytwin.toml` file or `STUDYTWIN__`-prefixed environment
/// variables (e.g. `STUDYTWIN__SERVER__PORT=8080`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub ml_service: MlServiceSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MlServiceSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Settings {
    /// Load configuration from defaults, optional file, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite://studytwin.db")?
            .set_default("ml_service.base_url", "http://localhost:8000")?
            .set_default("ml_service.timeout_secs", 10)?
            .set_default("auth.jwt_secret", "studytwin-dev-secret")?
            .set_default("auth.token_ttl_hours", 168)?
            .add_source(File::with_name("studytwin").required(false))
            .add_source(Environment::with_prefix("STUDYTWIN").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
