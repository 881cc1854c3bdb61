use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// `APP_ENV` selects the preset, individual variables then override it.
    /// `DATABASE_URL` and `JWT_SECRET` have no defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::base_from_env()?;
        config.database.url = required_var("DATABASE_URL")?;
        config.security.jwt_secret = jwt_secret()?;
        Ok(config)
    }

    /// Database settings alone, for tools that never issue tokens.
    pub fn database_from_env() -> Result<DatabaseConfig, ConfigError> {
        let mut database = Self::base_from_env()?.database;
        database.url = required_var("DATABASE_URL")?;
        Ok(database)
    }

    /// Security settings alone, for tools that never touch the database.
    pub fn security_from_env() -> Result<SecurityConfig, ConfigError> {
        let mut security = Self::base_from_env()?.security;
        security.jwt_secret = jwt_secret()?;
        Ok(security)
    }

    fn base_from_env() -> Result<Self, ConfigError> {
        Self::preset(Environment::from_env()).with_env_overrides()
    }

    /// Built-in defaults for an environment, before any overrides.
    pub fn preset(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = parse_var("PORT", &v)?;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = parse_var("DATABASE_RUN_MIGRATIONS", &v)?;
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = parse_var("SECURITY_JWT_EXPIRY_HOURS", &v)?;
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        // Upload overrides
        if let Ok(v) = env::var("UPLOAD_DIR") {
            self.uploads.dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("UPLOAD_MAX_BYTES") {
            self.uploads.max_upload_bytes = parse_var("UPLOAD_MAX_BYTES", &v)?;
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 7000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 2,
                // empty list = any origin
                cors_origins: Vec::new(),
            },
            uploads: UploadConfig {
                dir: PathBuf::from("uploads"),
                max_upload_bytes: 10 * 1024 * 1024, // 10MB
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 7000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 2,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            uploads: UploadConfig {
                dir: PathBuf::from("uploads"),
                max_upload_bytes: 5 * 1024 * 1024, // 5MB
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 7000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 2,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            uploads: UploadConfig {
                dir: PathBuf::from("uploads"),
                max_upload_bytes: 5 * 1024 * 1024, // 5MB
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Environment {
    /// Reads `APP_ENV`; anything unrecognised is development.
    pub fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

fn required_var(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn jwt_secret() -> Result<String, ConfigError> {
    let secret = required_var("JWT_SECRET")?;
    if secret.trim().is_empty() {
        return Err(ConfigError::Invalid {
            key: "JWT_SECRET",
            value: "<empty>".to_string(),
        });
    }
    Ok(secret)
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.security.jwt_expiry_hours, 2);
        assert!(config.database.run_migrations);
        assert!(config.security.cors_origins.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.database.run_migrations);
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.security.cors_origins.len(), 1);
    }

    #[test]
    fn parse_var_reports_key_and_value() {
        let err = parse_var::<u16>("PORT", "seventy").unwrap_err();
        match err {
            ConfigError::Invalid { key, value } => {
                assert_eq!(key, "PORT");
                assert_eq!(value, "seventy");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(parse_var::<bool>("X", " true ").unwrap(), true);
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let mut config = AppConfig::development();
        config.server.host = "127.0.0.1".into();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
