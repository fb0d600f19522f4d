/// Configuration management for the API server
///
/// All configuration is read once at startup from environment variables
/// (a `.env` file is honored in development) into an immutable `Config`.
/// Components receive it by reference through the application state;
/// nothing mutates it after startup.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `JWT_SECRET`: access token signing secret, at least 32 bytes (required)
/// - `PARTNER_API_KEY`: pre-shared key for the billing partner webhook (required)
/// - `API_HOST`: bind host (default: 0.0.0.0)
/// - `API_PORT`: bind port (default: 8080)
/// - `ACCESS_TOKEN_TTL_SECONDS`: access token lifetime (default: 86400)
/// - `REFRESH_TOKEN_TTL_DAYS`: refresh token lifetime (default: 60)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Access token signing secret
    ///
    /// Must be at least 32 bytes. Generate with `openssl rand -hex 32`.
    /// Rotating it invalidates every outstanding access token at once;
    /// refresh tokens are unaffected.
    pub jwt_secret: String,

    /// Pre-shared key authenticating the billing partner's webhook calls
    pub partner_api_key: String,

    /// Access token lifetime in seconds
    pub access_token_ttl_seconds: i64,

    /// Refresh token lifetime in days
    pub refresh_token_ttl_days: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing, a value
    /// fails to parse, or the signing secret is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env if present (development convenience)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let partner_api_key = env::var("PARTNER_API_KEY")
            .map_err(|_| anyhow::anyhow!("PARTNER_API_KEY environment variable is required"))?;

        let access_token_ttl_seconds = env::var("ACCESS_TOKEN_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<i64>()?;
        let refresh_token_ttl_days = env::var("REFRESH_TOKEN_TTL_DAYS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<i64>()?;

        Ok(Self {
            api: ApiConfig { host, port },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig {
                jwt_secret,
                partner_api_key,
                access_token_ttl_seconds,
                refresh_token_ttl_days,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Access token lifetime as a duration
    pub fn access_token_ttl(&self) -> Duration {
        Duration::seconds(self.auth.access_token_ttl_seconds)
    }

    /// Refresh token lifetime as a duration
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::days(self.auth.refresh_token_ttl_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/warbler_test".to_string(),
                max_connections: 10,
            },
            auth: AuthConfig {
                jwt_secret: "test-secret-key-at-least-32-bytes-long".to_string(),
                partner_api_key: "f271c81ff7084fac".to_string(),
                access_token_ttl_seconds: 86400,
                refresh_token_ttl_days: 60,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_token_lifetimes() {
        let config = test_config();
        assert_eq!(config.access_token_ttl(), Duration::hours(24));
        assert_eq!(config.refresh_token_ttl(), Duration::days(60));
    }
}
