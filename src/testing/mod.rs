use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::database::{AppSupportStore, DatabaseError, EmployeeStore};

/// In-memory stand-in for both backing databases.
///
/// Rows are kept in insertion order and returned as stored, so the first
/// matching row wins and NULL columns surface as `Some(None)`.
/// `tests/common::Fixture` models the same rows for the integration tests.
#[derive(Default)]
pub struct MemoryStore {
    admins: Vec<(String, i64, Option<String>)>,
    apps: Vec<(i64, Option<String>)>,
    employees: Vec<(String, Option<String>)>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn with_admin(mut self, email: &str, app_id: i64, admin_type: Option<&str>) -> Self {
        self.admins
            .push((email.to_string(), app_id, admin_type.map(str::to_string)));
        self
    }

    pub fn with_app_level(self, app_id: i64, level: &str) -> Self {
        self.with_app_row(app_id, Some(level))
    }

    /// APP_LIST row whose level column may be NULL
    pub fn with_app_row(mut self, app_id: i64, level: Option<&str>) -> Self {
        self.apps.push((app_id, level.map(str::to_string)));
        self
    }

    pub fn with_employee_level(self, employee_code: &str, level: &str) -> Self {
        self.with_employee_row(employee_code, Some(level))
    }

    /// EMPLOYEE_SECURITY_0 row whose level column may be NULL
    pub fn with_employee_row(mut self, employee_code: &str, level: Option<&str>) -> Self {
        self.employees.push((employee_code.to_string(), level.map(str::to_string)));
        self
    }

    /// Total number of lookups served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AppSupportStore for MemoryStore {
    async fn count_admins(&self, email: &str, app_id: i64) -> Result<i64, DatabaseError> {
        self.record_call();
        let count = self
            .admins
            .iter()
            .filter(|(e, id, _)| e == email && *id == app_id)
            .count();
        Ok(count as i64)
    }

    async fn admin_type(&self, email: &str, app_id: i64) -> Result<Option<Option<String>>, DatabaseError> {
        self.record_call();
        Ok(self
            .admins
            .iter()
            .find(|(e, id, _)| e == email && *id == app_id)
            .map(|(_, _, admin_type)| admin_type.clone()))
    }

    async fn app_security_level(&self, app_id: i64) -> Result<Option<Option<String>>, DatabaseError> {
        self.record_call();
        Ok(self
            .apps
            .iter()
            .find(|(id, _)| *id == app_id)
            .map(|(_, level)| level.clone()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn employee_security_level(&self, employee_code: &str) -> Result<Option<Option<String>>, DatabaseError> {
        self.record_call();
        Ok(self
            .employees
            .iter()
            .find(|(code, _)| code == employee_code)
            .map(|(_, level)| level.clone()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Store whose every lookup fails as if the database were unreachable
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    fn error(&self) -> DatabaseError {
        DatabaseError::Sqlx(sqlx::Error::Io(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            self.message.clone(),
        )))
    }
}

#[async_trait]
impl AppSupportStore for FailingStore {
    async fn count_admins(&self, _email: &str, _app_id: i64) -> Result<i64, DatabaseError> {
        Err(self.error())
    }

    async fn admin_type(&self, _email: &str, _app_id: i64) -> Result<Option<Option<String>>, DatabaseError> {
        Err(self.error())
    }

    async fn app_security_level(&self, _app_id: i64) -> Result<Option<Option<String>>, DatabaseError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(self.error())
    }
}

#[async_trait]
impl EmployeeStore for FailingStore {
    async fn employee_security_level(&self, _employee_code: &str) -> Result<Option<Option<String>>, DatabaseError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(self.error())
    }
}
