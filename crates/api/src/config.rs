use std::time::Duration;

use petstore_core::loader::TagResolution;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8888`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes (default: 1 MiB).
    pub max_body_bytes: usize,
    /// Database pool size (default: `20`).
    pub db_max_connections: u32,
    /// Deadline for a single store call in milliseconds (default: `3000`).
    pub store_timeout_ms: u64,
    /// How the pet loader treats tags it cannot resolve.
    pub tag_resolution: TagResolution,
    /// `Domain` attribute of the auth cookie; omitted when `None`.
    pub cookie_domain: Option<String>,
    /// JWT token configuration (secret, issuer, audience, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8888`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_BODY_BYTES`       | `1048576`                  |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `STORE_TIMEOUT_MS`     | `3000`                     |
    /// | `TAG_RESOLUTION`       | `best_effort`              |
    /// | `COOKIE_DOMAIN`        | unset                      |
    ///
    /// # Panics
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8888".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| "1048576".into())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let store_timeout_ms: u64 = std::env::var("STORE_TIMEOUT_MS")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("STORE_TIMEOUT_MS must be a valid u64");

        let tag_resolution: TagResolution = std::env::var("TAG_RESOLUTION")
            .unwrap_or_else(|_| "best_effort".into())
            .parse()
            .unwrap_or_else(|e| panic!("TAG_RESOLUTION is invalid: {e}"));

        let cookie_domain = std::env::var("COOKIE_DOMAIN")
            .ok()
            .filter(|d| !d.trim().is_empty());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            db_max_connections,
            store_timeout_ms,
            tag_resolution,
            cookie_domain,
            jwt,
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
