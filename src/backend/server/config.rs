/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opens the PostgreSQL connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * first by the binary), with defaults for local development:
 *
 * | var | default |
 * |---|---|
 * | `PORT` | `5000` |
 * | `DATABASE_URL` | required |
 * | `JWT_SECRET` | required in production |
 * | `APP_ENV` (or `NODE_ENV`) | `development` |
 * | `STATIC_DIR` | `frontend/build` |
 * | `CORS_ORIGIN` | `http://localhost:3000` |
 * | `PING_TIMEOUT_MS` | `60000` |
 * | `PING_INTERVAL_MS` | `25000` |
 *
 * # Error Handling
 *
 * Unlike optional services, the database is mandatory: a missing URL or a
 * failed connection is returned as an error and the binary exits.
 */

use std::path::PathBuf;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "frontend/build";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_PING_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_PING_INTERVAL_MS: u64 = 25_000;
const DEV_JWT_SECRET: &str = "roomcast-dev-secret-change-me";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on
    pub port: u16,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
    /// Deployment environment
    pub environment: Environment,
    /// Directory holding the built front-end bundle
    pub static_dir: PathBuf,
    /// Origin allowed to call the API and open relay connections
    pub cors_origin: String,
    /// Relay connections idle for longer than this are closed
    pub ping_timeout: Duration,
    /// Period between relay heartbeat pings
    pub ping_interval: Duration,
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingValue("DATABASE_URL"))?;

        let jwt_secret = match lookup("JWT_SECRET").filter(|secret| !secret.is_empty()) {
            Some(secret) => secret,
            None if environment == Environment::Production => {
                return Err(ConfigError::MissingValue("JWT_SECRET"));
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let mut builder = Self::builder()
            .database_url(database_url)
            .jwt_secret(jwt_secret)
            .environment(environment);

        if let Some(port) = lookup("PORT") {
            builder = builder.port(parse_number("PORT", &port)?);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }
        if let Some(ms) = lookup("PING_TIMEOUT_MS") {
            builder = builder.ping_timeout(Duration::from_millis(parse_number("PING_TIMEOUT_MS", &ms)?));
        }
        if let Some(ms) = lookup("PING_INTERVAL_MS") {
            builder = builder.ping_interval(Duration::from_millis(parse_number("PING_INTERVAL_MS", &ms)?));
        }

        builder.build()
    }

    /// Whether the static bundle should be served
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ping_timeout.is_zero() {
            return Err(ConfigError::Invalid("ping timeout must be greater than zero".to_string()));
        }
        if self.ping_interval.is_zero() || self.ping_interval >= self.ping_timeout {
            return Err(ConfigError::Invalid(
                "ping interval must be non-zero and shorter than the ping timeout".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Debug)]
pub struct ServerConfigBuilder {
    port: u16,
    database_url: String,
    jwt_secret: String,
    environment: Environment,
    static_dir: PathBuf,
    cors_origin: String,
    ping_timeout: Duration,
    ping_interval: Duration,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: "postgres://localhost/roomcast".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            environment: Environment::Development,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            ping_timeout: Duration::from_millis(DEFAULT_PING_TIMEOUT_MS),
            ping_interval: Duration::from_millis(DEFAULT_PING_INTERVAL_MS),
        }
    }
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }

    pub fn ping_timeout(mut self, timeout: Duration) -> Self {
        self.ping_timeout = timeout;
        self
    }

    pub fn ping_interval(mut self, interval: Duration) -> Self {
        self.ping_interval = interval;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let config = ServerConfig {
            port: self.port,
            database_url: self.database_url,
            jwt_secret: self.jwt_secret,
            environment: self.environment,
            static_dir: self.static_dir,
            cors_origin: self.cors_origin,
            ping_timeout: self.ping_timeout,
            ping_interval: self.ping_interval,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Open the database connection pool and run migrations
///
/// This function:
/// 1. Connects to `config.database_url`
/// 2. Runs the embedded migrations from `migrations/`
///
/// # Errors
///
/// Any failure is returned; startup treats it as fatal.
pub async fn load_database(config: &ServerConfig) -> Result<PgPool, ConfigError> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            e
        })?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database connected successfully");

    Ok(pool)
}
