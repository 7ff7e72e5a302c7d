#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use authz_lookup_api::database::{AppSupportStore, DatabaseError, EmployeeStore};
use authz_lookup_api::{app, AppState, AuthorizationResolver};

/// In-memory rows for both backing databases.
///
/// Mirrors the crate's unit-test `MemoryStore`: rows are returned as stored,
/// first match wins, and a NULL level column surfaces as `Some(None)`.
#[derive(Default)]
pub struct Fixture {
    admins: Vec<(String, i64, Option<String>)>,
    apps: Vec<(i64, Option<String>)>,
    employees: Vec<(String, Option<String>)>,
    lookups: AtomicUsize,
}

impl Fixture {
    pub fn admin(mut self, email: &str, app_id: i64, admin_type: Option<&str>) -> Self {
        self.admins.push((email.to_string(), app_id, admin_type.map(str::to_string)));
        self
    }

    pub fn app(self, app_id: i64, level: &str) -> Self {
        self.app_row(app_id, Some(level))
    }

    pub fn app_row(mut self, app_id: i64, level: Option<&str>) -> Self {
        self.apps.push((app_id, level.map(str::to_string)));
        self
    }

    pub fn employee(self, code: &str, level: &str) -> Self {
        self.employee_row(code, Some(level))
    }

    pub fn employee_row(mut self, code: &str, level: Option<&str>) -> Self {
        self.employees.push((code.to_string(), level.map(str::to_string)));
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AppSupportStore for Fixture {
    async fn count_admins(&self, email: &str, app_id: i64) -> Result<i64, DatabaseError> {
        self.touch();
        Ok(self.admins.iter().filter(|(e, id, _)| e == email && *id == app_id).count() as i64)
    }

    async fn admin_type(&self, email: &str, app_id: i64) -> Result<Option<Option<String>>, DatabaseError> {
        self.touch();
        Ok(self
            .admins
            .iter()
            .find(|(e, id, _)| e == email && *id == app_id)
            .map(|(_, _, t)| t.clone()))
    }

    async fn app_security_level(&self, app_id: i64) -> Result<Option<Option<String>>, DatabaseError> {
        self.touch();
        Ok(self.apps.iter().find(|(id, _)| *id == app_id).map(|(_, l)| l.clone()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for Fixture {
    async fn employee_security_level(&self, code: &str) -> Result<Option<Option<String>>, DatabaseError> {
        self.touch();
        Ok(self.employees.iter().find(|(c, _)| c == code).map(|(_, l)| l.clone()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Employee database that refuses every connection
pub struct Unreachable;

fn refused() -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "employee database unreachable",
    )))
}

#[async_trait]
impl EmployeeStore for Unreachable {
    async fn employee_security_level(&self, _code: &str) -> Result<Option<Option<String>>, DatabaseError> {
        Err(refused())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(refused())
    }
}

pub fn router(fixture: Arc<Fixture>) -> Router {
    app(AppState::new(AuthorizationResolver::new(fixture.clone(), fixture)))
}

pub fn router_with(app_support: Arc<dyn AppSupportStore>, employees: Arc<dyn EmployeeStore>) -> Router {
    app(AppState::new(AuthorizationResolver::new(app_support, employees)))
}

/// Send one request through the router and decode the JSON response body
pub async fn send(router: &Router, method: Method, path: &str, body: Option<&str>) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(raw) => {
            builder = builder.header("content-type", "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    let response = router.clone().oneshot(builder.body(body)?).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = serde_json::from_slice(&bytes)
        .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?;
    Ok((status, json))
}

pub async fn post(router: &Router, path: &str, body: Value) -> Result<(StatusCode, Value)> {
    send(router, Method::POST, path, Some(&body.to_string())).await
}

/// The real binary, started on a free port and pointed at a database port
/// where nothing listens
pub struct TestServer {
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let db_port = portpicker::pick_unused_port().context("failed to pick free db port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_authz-lookup-api"))
            .env("HOST", "127.0.0.1")
            .env("PORT", port.to_string())
            .env("DB_SERVER", "127.0.0.1")
            .env("DB_PORT", db_port.to_string())
            .env("DB_CONNECT_TIMEOUT_SECS", "2")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if client.get(format!("{}/", self.base_url)).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
