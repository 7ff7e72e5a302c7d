use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

/// Deployment environment. Selects the client driver variant used for
/// both database connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Local,
    Azure,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "azure" => Environment::Azure,
            _ => Environment::Local,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    /// Holds APP_ADMINS and APP_LIST
    pub app_support_db: String,
    /// Holds EMPLOYEE_SECURITY_0
    pub employee_db: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                app_support_db: "DW_APP_SUPPORT".to_string(),
                employee_db: "DW_STAGIN2".to_string(),
                username: String::new(),
                password: String::new(),
                connect_timeout_secs: 10,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables. Called
    /// once at startup; nothing below `main` reads the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("ENVIRONMENT") {
            config.environment = Environment::parse(&v);
        }

        // Database overrides
        if let Some(v) = lookup("DB_SERVER") {
            config.database.host = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            config.database.port = v.parse().unwrap_or(config.database.port);
        }
        if let Some(v) = lookup("DB_NAME") {
            config.database.app_support_db = v;
        }
        if let Some(v) = lookup("DB_NAME2") {
            config.database.employee_db = v;
        }
        if let Some(v) = lookup("DB_USER") {
            config.database.username = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            config.database.password = v;
        }
        if let Some(v) = lookup("DB_CONNECT_TIMEOUT_SECS") {
            config.database.connect_timeout_secs =
                v.parse().unwrap_or(config.database.connect_timeout_secs);
        }

        // Server overrides
        if let Some(v) = lookup("HOST") {
            config.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            config.server.port = v.parse().unwrap_or(config.server.port);
        }

        config
    }
}
