//! Read-only authorization lookups over HTTP.
//!
//! The deployed relations (`APP_ADMINS`, `APP_LIST`, `EMPLOYEE_SECURITY_0`)
//! live in SQL Server. The stores in [`database`] speak Postgres through sqlx,
//! which has no SQL Server driver, so this binary cannot reach the SQL Server
//! deployment directly: the relations must be mirrored into Postgres, with the
//! same table and column names, and `DB_SERVER`/`DB_PORT` pointed at it.
//! Other backends plug in through the [`database::AppSupportStore`] and
//! [`database::EmployeeStore`] traits.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod services;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use handlers::{app, AppState};
pub use services::{AuthorizationError, AuthorizationResolver};
