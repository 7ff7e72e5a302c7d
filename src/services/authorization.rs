use std::sync::Arc;
use tracing::debug;

use crate::database::{AppSupportStore, DatabaseError, EmployeeStore};
use crate::types::{AdminStatus, AuthorizationQuery, AuthorizationResult};

#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Datastore(#[from] DatabaseError),
}

/// Turns a partial [`AuthorizationQuery`] into the minimal set of store lookups.
///
/// The two stores are independent capabilities; nothing here joins across them.
#[derive(Clone)]
pub struct AuthorizationResolver {
    app_support: Arc<dyn AppSupportStore>,
    employees: Arc<dyn EmployeeStore>,
}

impl AuthorizationResolver {
    pub fn new(app_support: Arc<dyn AppSupportStore>, employees: Arc<dyn EmployeeStore>) -> Self {
        Self {
            app_support,
            employees,
        }
    }

    /// True iff at least one APP_ADMINS row links the email to the app
    pub async fn check_admin(&self, query: &AuthorizationQuery) -> Result<bool, AuthorizationError> {
        let (email, app_id) = require_admin_key(query)?;
        self.is_admin(email, app_id).await
    }

    /// Admin membership plus the recorded admin type of the first matching row
    pub async fn check_admin_with_type(&self, query: &AuthorizationQuery) -> Result<AdminStatus, AuthorizationError> {
        let (email, app_id) = require_admin_key(query)?;

        let row = self.app_support.admin_type(email, app_id).await?;
        Ok(admin_status(row))
    }

    pub async fn get_app_security_level(&self, query: &AuthorizationQuery) -> Result<String, AuthorizationError> {
        let app_id = query
            .app_id()
            .ok_or_else(|| AuthorizationError::Validation("APP_ID is required".to_string()))?;

        let row = self.app_support.app_security_level(app_id).await?;
        recorded_level(row).ok_or_else(|| AuthorizationError::NotFound("APP_ID not found".to_string()))
    }

    pub async fn get_employee_security_level(&self, query: &AuthorizationQuery) -> Result<String, AuthorizationError> {
        let employee_code = query
            .employee_code()
            .ok_or_else(|| AuthorizationError::Validation("EMPLOYEE_CODE is required".to_string()))?;

        let row = self.employees.employee_security_level(employee_code).await?;
        recorded_level(row).ok_or_else(|| AuthorizationError::NotFound("EMPLOYEE_CODE not found".to_string()))
    }

    /// Best-effort combined lookup.
    ///
    /// Only requested keys appear in the result, a missing row becomes `null`,
    /// and the three lookups run concurrently. Any store failure fails the whole
    /// request.
    pub async fn get_authorization(&self, query: &AuthorizationQuery) -> Result<AuthorizationResult, AuthorizationError> {
        let admin_key = query.admin_email().zip(query.app_id());
        let app_id = query.app_id();
        let employee_code = query.employee_code();

        let admin = async {
            match admin_key {
                Some((email, app_id)) => self.is_admin(email, app_id).await.map(Some),
                None => Ok(None),
            }
        };

        let app_security_level = async {
            match app_id {
                Some(app_id) => Ok(Some(recorded_level(self.app_support.app_security_level(app_id).await?))),
                None => Ok::<_, AuthorizationError>(None),
            }
        };

        let employee_security_level = async {
            match employee_code {
                Some(code) => Ok(Some(recorded_level(self.employees.employee_security_level(code).await?))),
                None => Ok::<_, AuthorizationError>(None),
            }
        };

        let (admin, app_security_level, employee_security_level) =
            tokio::try_join!(admin, app_security_level, employee_security_level)?;

        let result = AuthorizationResult {
            admin,
            app_security_level,
            employee_security_level,
        };
        debug!("Combined authorization lookup resolved {} key(s)", result.len());
        Ok(result)
    }

    /// Ping the app support and employee databases concurrently
    pub async fn ping(&self) -> (Result<(), DatabaseError>, Result<(), DatabaseError>) {
        tokio::join!(self.app_support.ping(), self.employees.ping())
    }

    async fn is_admin(&self, email: &str, app_id: i64) -> Result<bool, AuthorizationError> {
        let count = self.app_support.count_admins(email, app_id).await?;
        Ok(count > 0)
    }
}

fn require_admin_key(query: &AuthorizationQuery) -> Result<(&str, i64), AuthorizationError> {
    query
        .admin_email()
        .zip(query.app_id())
        .ok_or_else(|| AuthorizationError::Validation("ADMIN_EMAIL and APP_ID are required".to_string()))
}

/// A level row whose column is NULL counts as not found
fn recorded_level(row: Option<Option<String>>) -> Option<String> {
    row.flatten()
}

/// Any matching row makes the caller an admin. A NULL or empty ADMIN_TYPE
/// means no type recorded.
fn admin_status(row: Option<Option<String>>) -> AdminStatus {
    match row {
        Some(admin_type) => AdminStatus {
            admin: true,
            admin_type: admin_type.filter(|t| !t.is_empty()),
        },
        None => AdminStatus::not_admin(),
    }
}
