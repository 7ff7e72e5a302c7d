use async_trait::async_trait;
use tracing::debug;

use crate::database::manager::{ConnectionTarget, DatabaseError, DatabaseManager};
use crate::database::store::{AppSupportStore, EmployeeStore};

const COUNT_ADMINS: &str = "SELECT COUNT(*) FROM APP_ADMINS WHERE ADMIN_EMAIL = $1 AND APP_ID = $2";

const SELECT_ADMIN_TYPE: &str =
    "SELECT ADMIN_TYPE FROM APP_ADMINS WHERE ADMIN_EMAIL = $1 AND APP_ID = $2 LIMIT 1";

const SELECT_APP_SECURITY_LEVEL: &str =
    "SELECT App_Security_level FROM APP_LIST WHERE APP_ID = $1 LIMIT 1";

const SELECT_EMPLOYEE_SECURITY_LEVEL: &str =
    "SELECT TITLE_GROUP_SECURITY_LEVEL FROM EMPLOYEE_SECURITY_0 WHERE EMPLOYEE_CODE = $1 LIMIT 1";

/// APP_ADMINS / APP_LIST lookups against the app support database
pub struct PgAppSupportStore {
    manager: DatabaseManager,
}

impl PgAppSupportStore {
    pub fn new(manager: DatabaseManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl AppSupportStore for PgAppSupportStore {
    async fn count_admins(&self, email: &str, app_id: i64) -> Result<i64, DatabaseError> {
        let mut conn = self.manager.connect(ConnectionTarget::AppSupport).await?;

        let result = sqlx::query_scalar::<_, i64>(COUNT_ADMINS)
            .bind(email)
            .bind(app_id)
            .fetch_one(&mut conn)
            .await;

        DatabaseManager::release(conn).await;

        let count = result?;
        debug!("APP_ADMINS count for app {}: {}", app_id, count);
        Ok(count)
    }

    async fn admin_type(&self, email: &str, app_id: i64) -> Result<Option<Option<String>>, DatabaseError> {
        let mut conn = self.manager.connect(ConnectionTarget::AppSupport).await?;

        let result = sqlx::query_scalar::<_, Option<String>>(SELECT_ADMIN_TYPE)
            .bind(email)
            .bind(app_id)
            .fetch_optional(&mut conn)
            .await;

        DatabaseManager::release(conn).await;

        Ok(result?)
    }

    async fn app_security_level(&self, app_id: i64) -> Result<Option<Option<String>>, DatabaseError> {
        let mut conn = self.manager.connect(ConnectionTarget::AppSupport).await?;

        let result = sqlx::query_scalar::<_, Option<String>>(SELECT_APP_SECURITY_LEVEL)
            .bind(app_id)
            .fetch_optional(&mut conn)
            .await;

        DatabaseManager::release(conn).await;

        Ok(result?)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.manager.health_check(ConnectionTarget::AppSupport).await
    }
}

/// EMPLOYEE_SECURITY_0 lookups against the employee database
pub struct PgEmployeeStore {
    manager: DatabaseManager,
}

impl PgEmployeeStore {
    pub fn new(manager: DatabaseManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn employee_security_level(&self, employee_code: &str) -> Result<Option<Option<String>>, DatabaseError> {
        let mut conn = self.manager.connect(ConnectionTarget::Employee).await?;

        let result = sqlx::query_scalar::<_, Option<String>>(SELECT_EMPLOYEE_SECURITY_LEVEL)
            .bind(employee_code)
            .fetch_optional(&mut conn)
            .await;

        DatabaseManager::release(conn).await;

        Ok(result?)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.manager.health_check(ConnectionTarget::Employee).await
    }
}
