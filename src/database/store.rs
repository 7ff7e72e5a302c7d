use async_trait::async_trait;

use crate::database::manager::DatabaseError;

/// Lookups served by the app support database (admins and the app list)
#[async_trait]
pub trait AppSupportStore: Send + Sync {
    /// Number of admin rows linking `email` to `app_id`
    async fn count_admins(&self, email: &str, app_id: i64) -> Result<i64, DatabaseError>;

    /// ADMIN_TYPE of the first admin row for `email`/`app_id`, as stored.
    /// `None` when no row matches; `Some(None)` when the column is NULL.
    async fn admin_type(&self, email: &str, app_id: i64) -> Result<Option<Option<String>>, DatabaseError>;

    /// Security level column of the first APP_LIST row for `app_id`, as stored
    async fn app_security_level(&self, app_id: i64) -> Result<Option<Option<String>>, DatabaseError>;

    /// Round-trip to the backing database
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Lookups served by the employee database
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Title group security level column of the first row for `employee_code`, as stored
    async fn employee_security_level(&self, employee_code: &str) -> Result<Option<Option<String>>, DatabaseError>;

    /// Round-trip to the backing database
    async fn ping(&self) -> Result<(), DatabaseError>;
}
