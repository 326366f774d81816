//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Forecast engine limits.
    #[serde(default)]
    pub forecast: ForecastConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration as read from config files.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    3600 // 1 hour
}

/// Longest accepted access token lifetime: one year.
pub const MAX_ACCESS_TOKEN_EXPIRY_SECS: u64 = 365 * 24 * 60 * 60;

impl JwtSettings {
    /// Access token lifetime in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error unless the lifetime is between one second and
    /// [`MAX_ACCESS_TOKEN_EXPIRY_SECS`].
    pub fn access_token_expiry(&self) -> Result<i64, config::ConfigError> {
        let secs = self.access_token_expiry_secs;
        if !(1..=MAX_ACCESS_TOKEN_EXPIRY_SECS).contains(&secs) {
            return Err(config::ConfigError::Message(format!(
                "jwt.access_token_expiry_secs must be between 1 and \
                 {MAX_ACCESS_TOKEN_EXPIRY_SECS}, got {secs}"
            )));
        }
        i64::try_from(secs).map_err(|e| config::ConfigError::Message(e.to_string()))
    }
}

/// Forecast engine limits.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ForecastConfig {
    /// Longest accepted forecast window, in days.
    #[serde(default = "default_max_window_days")]
    pub max_window_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            max_window_days: default_max_window_days(),
        }
    }
}

fn default_max_window_days() -> u32 {
    3660 // ten years
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or a value is out
    /// of range.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PENNYWISE").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.jwt.access_token_expiry()?;
        Ok(config)
    }
}
