use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{DatabaseConfig, Environment};

/// Errors from DatabaseManager and the stores built on it
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Timed out after {secs}s connecting to {target} database")]
    ConnectTimeout { target: ConnectionTarget, secs: u64 },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Logical name of a backing database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionTarget {
    /// APP_ADMINS and APP_LIST
    AppSupport,
    /// EMPLOYEE_SECURITY_0
    Employee,
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::AppSupport => write!(f, "app support"),
            ConnectionTarget::Employee => write!(f, "employee"),
        }
    }
}

/// Opens one connection per logical operation against either backing database.
///
/// Holds no open connections itself; every call to [`DatabaseManager::connect`]
/// returns a fresh connection that the caller hands back through
/// [`DatabaseManager::release`].
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    environment: Environment,
    config: DatabaseConfig,
}

impl DatabaseManager {
    pub fn new(environment: Environment, config: DatabaseConfig) -> Self {
        Self { environment, config }
    }

    /// Database name behind a logical target
    pub fn database_name(&self, target: ConnectionTarget) -> &str {
        match target {
            ConnectionTarget::AppSupport => &self.config.app_support_db,
            ConnectionTarget::Employee => &self.config.employee_db,
        }
    }

    /// Connection descriptor for a target. The deployment environment picks
    /// the driver variant: hosted deployments require TLS, local ones prefer it.
    pub fn connect_options(&self, target: ConnectionTarget) -> PgConnectOptions {
        let ssl_mode = match self.environment {
            Environment::Azure => PgSslMode::Require,
            Environment::Local => PgSslMode::Prefer,
        };

        PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .database(self.database_name(target))
            .username(&self.config.username)
            .password(&self.config.password)
            .ssl_mode(ssl_mode)
    }

    /// Open a new connection, bounded by the configured connect timeout
    pub async fn connect(&self, target: ConnectionTarget) -> Result<PgConnection, DatabaseError> {
        let options = self.connect_options(target);
        let timeout = self.config.connect_timeout();

        debug!("Connecting to {} database {}", target, self.database_name(target));

        match tokio::time::timeout(timeout, PgConnection::connect_with(&options)).await {
            Ok(conn) => Ok(conn?),
            Err(_) => Err(DatabaseError::ConnectTimeout {
                target,
                secs: self.config.connect_timeout_secs,
            }),
        }
    }

    /// Close a connection obtained from [`DatabaseManager::connect`].
    /// A failed close is logged; the socket is dropped either way.
    pub async fn release(conn: PgConnection) {
        if let Err(e) = conn.close().await {
            warn!("Error closing database connection: {}", e);
        }
    }

    /// Pings a target database to ensure connectivity
    pub async fn health_check(&self, target: ConnectionTarget) -> Result<(), DatabaseError> {
        let mut conn = self.connect(target).await?;
        let result = sqlx::query("SELECT 1").execute(&mut conn).await;
        Self::release(conn).await;
        result?;
        Ok(())
    }
}
