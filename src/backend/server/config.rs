/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * the PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is
 * loaded by `main` first):
 *
 * | Variable | Default |
 * |---|---|
 * | `DATABASE_URL` | built from `DB_USERNAME`/`DB_PASSWORD`/`DB_HOST`/`DB_NAME` |
 * | `JWT_SECRET` | required |
 * | `PORT` | `8080` |
 * | `IMAGE_DIR` | `images` |
 * | `REQUEST_TIMEOUT_SECS` | `30` |
 * | `MAX_UPLOAD_BYTES` | `10485760` |
 * | `TOKEN_TTL_SECS` | `3600` |
 * | `BCRYPT_COST` | `bcrypt::DEFAULT_COST` |
 * | `DB_CONNECT_TIMEOUT_SECS` | `10` |
 *
 * # Error Handling
 *
 * Unlike optional services, the database is a hard dependency: a missing
 * URL, a failed connection or a failed migration is an error and the
 * server does not start.
 */

use std::path::PathBuf;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_IMAGE_DIR: &str = "images";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_DB_HOST: &str = "localhost:5432";
const DEFAULT_DB_NAME: &str = "messages";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub image_dir: PathBuf,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    /// How long startup waits for a database connection
    pub connect_timeout: Duration,
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = get("DB_USERNAME").ok_or(ConfigError::MissingValue("DATABASE_URL"))?;
                let password = get("DB_PASSWORD").ok_or(ConfigError::MissingValue("DB_PASSWORD"))?;
                let host = get("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
                let name = get("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
                format!("postgres://{user}:{password}@{host}/{name}")
            }
        };

        let mut builder = Self::builder()
            .database_url(database_url)
            .jwt_secret(get("JWT_SECRET").ok_or(ConfigError::MissingValue("JWT_SECRET"))?);

        if let Some(port) = get("PORT") {
            builder = builder.port(parse("PORT", &port)?);
        }
        if let Some(dir) = get("IMAGE_DIR") {
            builder = builder.image_dir(dir);
        }
        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            builder = builder.request_timeout(Duration::from_secs(parse("REQUEST_TIMEOUT_SECS", &secs)?));
        }
        if let Some(bytes) = get("MAX_UPLOAD_BYTES") {
            builder = builder.max_upload_bytes(parse("MAX_UPLOAD_BYTES", &bytes)?);
        }
        if let Some(secs) = get("TOKEN_TTL_SECS") {
            builder = builder.token_ttl(Duration::from_secs(parse("TOKEN_TTL_SECS", &secs)?));
        }
        if let Some(cost) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse("BCRYPT_COST", &cost)?);
        }
        if let Some(secs) = get("DB_CONNECT_TIMEOUT_SECS") {
            builder = builder.connect_timeout(Duration::from_secs(parse("DB_CONNECT_TIMEOUT_SECS", &secs)?));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < 8 {
            return Err(ConfigError::InvalidValue {
                name: "JWT_SECRET",
                value: "<at least 8 bytes required>".to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    image_dir: Option<PathBuf>,
    request_timeout: Option<Duration>,
    max_upload_bytes: Option<usize>,
    token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    connect_timeout: Option<Duration>,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = Some(bytes);
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let config = ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url.ok_or(ConfigError::MissingValue("DATABASE_URL"))?,
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            image_dir: self.image_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR)),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            max_upload_bytes: self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            token_ttl: self.token_ttl.unwrap_or(DEFAULT_TOKEN_TTL),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Connect to PostgreSQL and apply pending migrations
///
/// Gives up with `PoolTimedOut` once `connect_timeout` passes without a
/// connection.
pub async fn load_database(database_url: &str, connect_timeout: Duration) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .acquire_timeout(connect_timeout)
        .connect(database_url)
        .await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/postboard"),
            ("JWT_SECRET", "somesupersecretsecret"),
        ]))
        .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.image_dir, PathBuf::from("images"));
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.token_ttl, DEFAULT_TOKEN_TTL);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_database_url_from_credentials() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DB_USERNAME", "alice"),
            ("DB_PASSWORD", "pw"),
            ("JWT_SECRET", "somesupersecretsecret"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://alice:pw@localhost:5432/messages");
    }

    #[test]
    fn test_missing_secret() {
        let result = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://x/y")]));
        assert_matches!(result, Err(ConfigError::MissingValue("JWT_SECRET")));
    }

    #[test]
    fn test_missing_database() {
        let result = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "somesupersecretsecret")]));
        assert_matches!(result, Err(ConfigError::MissingValue("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x/y"),
            ("JWT_SECRET", "somesupersecretsecret"),
            ("PORT", "eighty"),
        ]));
        assert_matches!(result, Err(ConfigError::InvalidValue { name: "PORT", .. }));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x/y"),
            ("JWT_SECRET", "somesupersecretsecret"),
            ("PORT", "3000"),
            ("IMAGE_DIR", "/var/lib/postboard/images"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("BCRYPT_COST", "4"),
            ("DB_CONNECT_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.image_dir, PathBuf::from("/var/lib/postboard/images"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = ServerConfig::builder()
            .database_url("postgres://x/y")
            .jwt_secret("short")
            .build();
        assert_matches!(result, Err(ConfigError::InvalidValue { name: "JWT_SECRET", .. }));
    }
}
