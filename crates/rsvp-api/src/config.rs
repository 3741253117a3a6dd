// Server configuration loaded from environment variables.
// Decision: Every setting has a default so the server starts with no environment at all

use axum::http::HeaderValue;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATABASE_PATH: &str = "rsvps.db";

/// Where the RSVP database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// Plain filesystem path (`DATABASE_PATH`)
    Path(PathBuf),
    /// Full `sqlite:` URL (`DATABASE_URL`)
    Url(String),
}

impl std::fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseLocation::Path(path) => write!(f, "{}", path.display()),
            DatabaseLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// HTTP port
    pub port: u16,
    pub database: DatabaseLocation,
    /// Origins allowed by CORS. Empty means same-origin only.
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DatabaseLocation::Path(PathBuf::from(DEFAULT_DATABASE_PATH)),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// - `PORT`: HTTP port (default: 3000)
    /// - `HOST`: bind address (default: 0.0.0.0)
    /// - `DATABASE_URL`: `sqlite:` URL, takes precedence over `DATABASE_PATH`
    /// - `DATABASE_PATH`: SQLite file path (default: rsvps.db)
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, "Invalid PORT ({}), using {}", e, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let database = match (var("DATABASE_URL"), var("DATABASE_PATH")) {
            (Some(url), _) => DatabaseLocation::Url(url),
            (None, Some(path)) => DatabaseLocation::Path(PathBuf::from(path)),
            (None, None) => DatabaseLocation::Path(PathBuf::from(DEFAULT_DATABASE_PATH)),
        };

        let cors_origins: Vec<HeaderValue> = var("CORS_ALLOWED_ORIGINS")
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Self {
            host,
            port,
            database,
            cors_origins,
        }
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(
            config.database,
            DatabaseLocation::Path(PathBuf::from("rsvps.db"))
        );
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_port_and_path() {
        let config = config(&[("PORT", "8080"), ("DATABASE_PATH", "/tmp/wedding.db")]);

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database,
            DatabaseLocation::Path(PathBuf::from("/tmp/wedding.db"))
        );
    }

    #[test]
    fn test_invalid_port_falls_back() {
        assert_eq!(config(&[("PORT", "not-a-port")]).port, DEFAULT_PORT);
        assert_eq!(config(&[("PORT", "70000")]).port, DEFAULT_PORT);
    }

    #[test]
    fn test_database_url_wins() {
        let config = config(&[
            ("DATABASE_URL", "sqlite://data/rsvps.db"),
            ("DATABASE_PATH", "ignored.db"),
        ]);

        assert_eq!(
            config.database,
            DatabaseLocation::Url("sqlite://data/rsvps.db".to_string())
        );
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config(&[("PORT", ""), ("DATABASE_PATH", "  ")]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(
            config.database,
            DatabaseLocation::Path(PathBuf::from(DEFAULT_DATABASE_PATH))
        );
    }

    #[test]
    fn test_cors_origins() {
        let config = config(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://example.com, https://admin.example.com",
        )]);

        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[0], "https://example.com");
    }
}
